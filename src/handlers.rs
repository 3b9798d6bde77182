pub mod clientes;
pub mod enderecos;
pub mod entregas;
pub mod produtos;
