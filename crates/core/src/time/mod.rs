pub mod epoch;
