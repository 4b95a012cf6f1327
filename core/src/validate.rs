use alloc::vec::Vec;

use crate::*;

/// Outcome of [`validate`]: one error per violated rule, in checking order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Validation {
    errors: Vec<ValidationError>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_result(self) -> core::result::Result<(), Vec<ValidationError>> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Structural checks on raw parameters before they are decoded into a board.
///
/// `order` is checked for length and range only. A list such as 24 zeros
/// passes here and is rejected later by [`Order::from_indices`].
pub fn validate(params: &UrlParams) -> Validation {
    let mut errors = Vec::new();

    if let Some(data) = params.data() {
        let len = data.chars().count();
        if len > MAX_DATA_LEN {
            errors.push(ValidationError::DataTooLarge {
                len,
                max: MAX_DATA_LEN,
            });
        }
    }

    if let Some(order) = params.order() {
        let indices = parse_indices(order);
        if indices.len() != CONTENT_CELLS {
            errors.push(ValidationError::OrderCount {
                expected: CONTENT_CELLS,
                actual: indices.len(),
            });
        }
        let max = CONTENT_CELLS as i64 - 1;
        let out_of_range = out_of_range(&indices, max);
        if !out_of_range.is_empty() {
            errors.push(ValidationError::OrderOutOfRange {
                max,
                values: out_of_range,
            });
        }
    }

    if let Some(marked) = params.marked() {
        let max = BOARD_CELLS as i64 - 1;
        let out_of_range = out_of_range(&parse_indices(marked), max);
        if !out_of_range.is_empty() {
            errors.push(ValidationError::MarkedOutOfRange {
                max,
                values: out_of_range,
            });
        }
    }

    if !errors.is_empty() {
        log::debug!("rejected url params: {:?}", errors);
    }
    Validation { errors }
}

fn out_of_range(indices: &[i64], max: i64) -> Vec<i64> {
    indices
        .iter()
        .copied()
        .filter(|index| !(0..=max).contains(index))
        .collect()
}
