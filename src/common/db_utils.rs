use crate::common::error::AppError;

// SQLSTATE de "numeric value out of range"
const FORA_DO_INTERVALO: &str = "22003";

// ---
// Classificação de erros de restrição do Postgres
// ---
/// Converte violações de restrição e valores fora do intervalo da coluna em
/// erros de domínio. Qualquer outro erro continua sendo `DatabaseError` (500).
pub(crate) fn map_constraint_error(
    e: sqlx::Error,
    on_unique: impl FnOnce() -> AppError,
) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
        if db_err.is_check_violation() {
            let constraint = db_err.constraint().unwrap_or_default();
            return AppError::bad_request(check_message(constraint));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::not_found("Registro referenciado não encontrado.");
        }
        if db_err.code().as_deref() == Some(FORA_DO_INTERVALO) {
            return AppError::bad_request("Valor fora do intervalo permitido.");
        }
    }
    e.into()
}

fn check_message(constraint: &str) -> String {
    if constraint.contains("estoque") {
        "Estoque insuficiente.".to_string()
    } else if constraint.contains("preco") {
        "O preço não pode ser negativo.".to_string()
    } else {
        format!("Restrição violada: {}", constraint)
    }
}
