pub mod charge_reader;
pub mod charge_writer;
