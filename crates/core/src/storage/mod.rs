pub mod quote_csv;
