pub mod cliente;
pub mod endereco;
pub mod entrega;
pub mod paginacao;
pub mod produto;
pub mod validacao;
