pub mod cliente_service;
pub use cliente_service::ClienteService;
pub mod endereco_service;
pub use endereco_service::EnderecoService;
pub mod produto_service;
pub use produto_service::ProdutoService;
pub mod entrega_service;
pub use entrega_service::EntregaService;
