// src/models/paginacao.rs

use serde::Deserialize;
use validator::Validate;

pub const PAGINA_PADRAO: u32 = 1;
pub const LIMITE_PADRAO: u32 = 10;

/// Página já normalizada que os repositórios recebem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginacao {
    pub pagina: u32,
    pub limite: u32,
}

impl Default for Paginacao {
    fn default() -> Self {
        Self {
            pagina: PAGINA_PADRAO,
            limite: LIMITE_PADRAO,
        }
    }
}

impl Paginacao {
    pub fn new(pagina: Option<u32>, limite: Option<u32>) -> Self {
        Self {
            pagina: pagina.unwrap_or(PAGINA_PADRAO).max(1),
            limite: limite.unwrap_or(LIMITE_PADRAO).max(1),
        }
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.pagina) - 1) * i64::from(self.limite)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.limite)
    }
}

// Query string: ?pagina=2&limite=5
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaginacaoQuery {
    #[validate(range(min = 1, message = "A página deve ser maior ou igual a 1."))]
    pub pagina: Option<u32>,

    #[validate(range(min = 1, max = 100, message = "O limite deve estar entre 1 e 100."))]
    pub limite: Option<u32>,
}

impl From<PaginacaoQuery> for Paginacao {
    fn from(query: PaginacaoQuery) -> Self {
        Paginacao::new(query.pagina, query.limite)
    }
}
