// Declare modules within this crate
pub mod carros;
pub mod client;
pub mod config;
pub mod datetime;
pub mod diagnostics;
pub mod errors;
pub mod mantenimientos;
pub mod models;
pub mod query;
pub mod validate;

// Re-export the main components for users of this crate
pub use carros::CarrosApi;
pub use client::ApiClient;
pub use config::{ApiConfig, Credentials};
pub use errors::ApiClientError;
pub use mantenimientos::MantenimientosApi;
pub use models::{
    Carro, CarroData, CarroFilter, Combustible, Estadisticas, Estado, EstadoMantenimiento,
    Mantenimiento, MantenimientoData, MantenimientoFilter, TipoMantenimiento, Transmision,
};
pub use query::QueryString;
