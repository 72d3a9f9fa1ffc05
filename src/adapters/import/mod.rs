//! Upload decoding adapters.

mod csv_reader;

pub use csv_reader::CsvSheetReader;
