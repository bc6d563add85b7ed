// Root shell and re-exports for workspace crates used by bins.
pub use data_runtime as data;
pub use server_core as server;
