// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Byte-stable snapshot of a facade's table and caches.
//!
//! # Format
//!
//! A sequence of little-endian `u64` records. Positions and letters are
//! 1-based and `0` means absent.
//!
//! ```text
//! nr_generators, position of each generator
//! nr_elements, then prefix suffix first_letter final_letter per element
//! 0 | 1 nr_elements sorted positions
//! 0 | 1 nr_relations, then per relation: len lhs letters, len rhs letters
//! ```
//!
//! The leading counts are the only schema information.

use serde::{Deserialize, Serialize};

use crate::element::ElementHandle;
use crate::engine::{ElementTable, UNDEFINED};
use crate::error::{EnumerationError, Result};
use crate::memo::{Relation, SortedIndex, Word};

const RECORD: usize = std::mem::size_of::<u64>();

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Position of each generator, by letter.
    pub generators: Vec<usize>,
    pub prefix: Vec<usize>,
    pub suffix: Vec<usize>,
    pub first_letter: Vec<usize>,
    pub final_letter: Vec<usize>,
    /// Positions in sorted order, if the sorted index was computed.
    pub sorted: Option<Vec<usize>>,
    /// Relations, if they were computed.
    pub relations: Option<Vec<Relation>>,
}

impl Snapshot {
    pub(crate) fn capture<H: ElementHandle>(
        table: &ElementTable<H>,
        sorted: Option<&SortedIndex>,
        relations: Option<&[Relation]>,
    ) -> Self {
        let one_based = |p: usize| if p == UNDEFINED { 0 } else { p + 1 };
        let n = table.len();
        Self {
            generators: (0..table.nr_generators())
                .map(|letter| table.letter_to_pos(letter) + 1)
                .collect(),
            prefix: (0..n).map(|p| one_based(table.prefix(p))).collect(),
            suffix: (0..n).map(|p| one_based(table.suffix(p))).collect(),
            first_letter: (0..n).map(|p| table.first_letter(p) + 1).collect(),
            final_letter: (0..n).map(|p| table.final_letter(p) + 1).collect(),
            sorted: sorted.map(|index| index.order().iter().map(|&p| p + 1).collect()),
            relations: relations.map(<[Relation]>::to_vec),
        }
    }

    pub fn nr_elements(&self) -> usize {
        self.prefix.len()
    }

    /// Encode as little-endian `u64` records.
    ///
    /// Fails if the per-element columns differ in length.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let n = self.nr_elements();
        for (name, column) in [
            ("suffix", &self.suffix),
            ("first_letter", &self.first_letter),
            ("final_letter", &self.final_letter),
        ] {
            if column.len() != n {
                return Err(EnumerationError::InvalidArgument(format!(
                    "snapshot has {} {} entries for {} elements",
                    column.len(),
                    name,
                    n
                )));
            }
        }
        let mut records: Vec<usize> = Vec::new();
        records.push(self.generators.len());
        records.extend_from_slice(&self.generators);
        records.push(n);
        for p in 0..n {
            records.extend_from_slice(&[
                self.prefix[p],
                self.suffix[p],
                self.first_letter[p],
                self.final_letter[p],
            ]);
        }
        match &self.sorted {
            Some(order) => {
                records.push(1);
                records.push(order.len());
                records.extend_from_slice(order);
            }
            None => records.push(0),
        }
        match &self.relations {
            Some(relations) => {
                records.push(1);
                records.push(relations.len());
                for relation in relations {
                    for word in [&relation.lhs, &relation.rhs] {
                        records.push(word.len());
                        records.extend_from_slice(word);
                    }
                }
            }
            None => records.push(0),
        }
        Ok(records
            .into_iter()
            .flat_map(|r| (r as u64).to_le_bytes())
            .collect())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % RECORD != 0 {
            return Err(malformed(format!(
                "{} bytes is not a whole number of records",
                bytes.len()
            )));
        }
        let mut reader = Reader {
            records: bytes.chunks_exact(RECORD),
        };

        let generators = reader.counted("generator")?;
        let n = reader.count("element", 4)?;
        let mut snapshot = Snapshot {
            generators,
            prefix: Vec::with_capacity(n),
            suffix: Vec::with_capacity(n),
            first_letter: Vec::with_capacity(n),
            final_letter: Vec::with_capacity(n),
            sorted: None,
            relations: None,
        };
        for _ in 0..n {
            snapshot.prefix.push(reader.next()?);
            snapshot.suffix.push(reader.next()?);
            snapshot.first_letter.push(reader.next()?);
            snapshot.final_letter.push(reader.next()?);
        }
        if reader.flag("sorted")? {
            snapshot.sorted = Some(reader.counted("sorted position")?);
        }
        if reader.flag("relations")? {
            let count = reader.count("relation", 2)?;
            let mut relations = Vec::with_capacity(count);
            for _ in 0..count {
                let lhs: Word = reader.counted("letter")?;
                let rhs: Word = reader.counted("letter")?;
                relations.push(Relation::new(lhs, rhs));
            }
            snapshot.relations = Some(relations);
        }
        if reader.records.len() != 0 {
            return Err(malformed(format!(
                "{} trailing records",
                reader.records.len()
            )));
        }
        Ok(snapshot)
    }
}

fn malformed(message: String) -> EnumerationError {
    EnumerationError::InvalidArgument(format!("malformed snapshot: {}", message))
}

struct Reader<'b> {
    records: std::slice::ChunksExact<'b, u8>,
}

impl Reader<'_> {
    fn next(&mut self) -> Result<usize> {
        let record = self
            .records
            .next()
            .ok_or_else(|| malformed("truncated".to_string()))?;
        let mut buf = [0u8; RECORD];
        buf.copy_from_slice(record);
        usize::try_from(u64::from_le_bytes(buf))
            .map_err(|_| malformed("record does not fit in usize".to_string()))
    }

    /// A count of items each taking at least `width` records.
    fn count(&mut self, what: &str, width: usize) -> Result<usize> {
        let count = self.next()?;
        if count.saturating_mul(width) > self.records.len() {
            return Err(malformed(format!(
                "{} {} entries do not fit in the remaining input",
                count, what
            )));
        }
        Ok(count)
    }

    fn counted(&mut self, what: &str) -> Result<Vec<usize>> {
        let count = self.count(what, 1)?;
        (0..count).map(|_| self.next()).collect()
    }

    fn flag(&mut self, what: &str) -> Result<bool> {
        match self.next()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(malformed(format!("{} flag is {}", what, other))),
        }
    }
}
