// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Cursors over a facade's elements.
//!
//! A [`Cursor`] is just a position and an order; it borrows nothing between
//! calls, so it can be stored alongside the facade it walks. [`Elements`]
//! wraps a cursor and a mutable borrow as a standard iterator.

use super::EnumerationFacade;
use crate::element::ElementCapability;
use crate::error::{EnumerationError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Positions in the order elements were discovered.
    #[default]
    Discovery,
    /// Ranks in the capability's total order.
    Sorted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    position: usize,
    order: Order,
}

impl Cursor {
    pub fn new(order: Order) -> Self {
        Self { position: 0, order }
    }

    /// Number of elements already returned.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn order(&self) -> Order {
        self.order
    }

    /// Advance by one and return the element there.
    ///
    /// Fails with [`EnumerationError::PositionOutOfRange`] once the cursor
    /// has passed the last element; the cursor does not move in that case.
    pub fn next<C: ElementCapability>(
        &mut self,
        facade: &mut EnumerationFacade<'_, C>,
    ) -> Result<C::Handle> {
        let position = self.position + 1;
        let x = match self.order {
            Order::Discovery => facade.element_at(position)?,
            Order::Sorted => facade.element_at_sorted(position)?,
        };
        self.position = position;
        Ok(x)
    }

    /// Whether every element has been returned.
    ///
    /// Forces enough enumeration to know the final size.
    pub fn is_done<C: ElementCapability>(
        &self,
        facade: &mut EnumerationFacade<'_, C>,
    ) -> Result<bool> {
        Ok(self.position >= facade.size()?)
    }
}

/// Iterator over a facade's elements, yielding `Result`s.
///
/// Ends after the last element. An error other than running off the end is
/// yielded once, after which the iterator is fused.
pub struct Elements<'f, 'a, C: ElementCapability> {
    facade: &'f mut EnumerationFacade<'a, C>,
    cursor: Cursor,
    finished: bool,
}

impl<'f, 'a, C: ElementCapability> Elements<'f, 'a, C> {
    pub(crate) fn new(facade: &'f mut EnumerationFacade<'a, C>, order: Order) -> Self {
        Self {
            facade,
            cursor: Cursor::new(order),
            finished: false,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }
}

impl<C: ElementCapability> Iterator for Elements<'_, '_, C> {
    type Item = Result<C::Handle>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.cursor.next(self.facade) {
            Ok(x) => Some(Ok(x)),
            Err(EnumerationError::PositionOutOfRange { .. }) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
