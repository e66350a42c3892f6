#[macro_use]
extern crate lazy_static;

pub mod crossing;
pub mod elimination;
pub mod error;
pub mod hailstone;
pub mod rational;
pub mod system;
pub mod trajectory;

pub use error::SolveError;
pub use hailstone::HailstoneRecord;
pub use trajectory::Rock;

pub mod io {
    use crate::hailstone::{HailstoneRecord, ParseHailstoneError};
    use std::io::BufRead;

    #[derive(Debug, thiserror::Error)]
    pub enum ReadError {
        #[error("reading input failed")]
        Io(#[from] std::io::Error),
        #[error("line {line}: {source}")]
        Parse {
            line: usize,
            source: ParseHailstoneError,
        },
    }

    /// One record per line, blank lines skipped.
    pub struct Records<R> {
        input: R,
        buffer: String,
        line: usize,
    }

    impl<R: BufRead> Records<R> {
        pub fn new(input: R) -> Self {
            Self {
                input,
                buffer: String::new(),
                line: 0,
            }
        }
    }

    impl<R: BufRead> Iterator for Records<R> {
        type Item = Result<HailstoneRecord, ReadError>;

        fn next(&mut self) -> Option<Self::Item> {
            loop {
                self.buffer.clear();
                let read = self.input.read_line(&mut self.buffer);
                self.line += 1;

                match read {
                    Ok(0) => return None,
                    Ok(_) => {}
                    Err(e) => return Some(Err(ReadError::Io(e))),
                }

                let buf = self.buffer.trim();
                if buf.is_empty() {
                    continue;
                }

                let line = self.line;
                return Some(
                    buf.parse::<HailstoneRecord>()
                        .map_err(|source| ReadError::Parse { line, source }),
                );
            }
        }
    }

    pub fn read_all<R: BufRead>(input: R) -> Result<Vec<HailstoneRecord>, ReadError> {
        Records::new(input).collect()
    }

    #[test]
    fn skips_blank_lines() {
        use std::io::Cursor;
        let input = b"19, 13, 30 @ -2,  1, -2\n\n18, 19, 22 @ -1, -1, -2\n";
        let records = read_all(Cursor::new(&input[..])).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], HailstoneRecord::new([18, 19, 22], [-1, -1, -2]));
    }

    #[test]
    fn reports_line_number() {
        use std::io::Cursor;
        let input = b"19, 13, 30 @ -2,  1, -2\n\n18, 19 @ -1, -1, -2";
        match read_all(Cursor::new(&input[..])) {
            Err(ReadError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected {:?}", other),
        }
    }
}
