pub mod caucion;
