//! Subvector order coding
//!
//! The quantizer order is sent as a unary code: order 0 is a single `0`,
//! order `n >= 2` is `n - 1` ones followed by a `0`. A codeword of order
//! `n` costs `5n` bits in total. When exactly `5n - 1` bits are left the
//! stop bit is dropped, since the decoder can tell from its budget that no
//! longer run would fit. With 8 bits or less left no order is sent and the
//! subvector is zero.

use super::bitstream::{BitCursor, BitWriter};
use crate::types::QuantizerOrder;

/// Budgets at or below this size carry no order code
pub const MIN_ORDER_BUDGET: usize = 8;

/// How a codeword fits into the remaining budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFit {
    /// Unary run with its stop bit
    Terminated,
    /// Unary run whose stop bit is implied by the budget
    ImplicitStop,
    /// The codeword does not fit
    DoesNotFit,
}

/// Longest unary run the decoder reads with `bits` left
///
/// A run of `ones` ones implies an order whose codeword needs at least
/// `5 * ones + 4` bits; the run ends once that reaches the budget.
fn max_unary_run(bits: usize) -> u32 {
    (bits / 5) as u32
}

/// Decide whether a nonzero codeword of `order` fits into `bits`
pub fn order_fit(order: QuantizerOrder, bits: usize) -> OrderFit {
    if order.is_zero() || !order.is_supported() || bits <= MIN_ORDER_BUDGET {
        return OrderFit::DoesNotFit;
    }
    let cost = order.cost_bits() as usize;
    if cost <= bits {
        OrderFit::Terminated
    } else if cost - 1 == bits {
        OrderFit::ImplicitStop
    } else {
        OrderFit::DoesNotFit
    }
}

/// Read the order of the next subvector and charge its bits
pub fn read_order(cursor: &mut BitCursor<'_>, bits_remaining: &mut usize) -> QuantizerOrder {
    if *bits_remaining <= MIN_ORDER_BUDGET {
        return QuantizerOrder::ZERO;
    }

    let max = max_unary_run(*bits_remaining);
    let ones = cursor.read_unary(max);
    let consumed = if ones == max { ones } else { ones + 1 };
    *bits_remaining = bits_remaining.saturating_sub(consumed as usize);
    QuantizerOrder::from_unary_run(ones)
}

/// Write the order of the next subvector and charge its bits
///
/// A nonzero order must fit the budget (see [`order_fit`]); the frame
/// encoder replaces codewords that do not fit with order 0.
pub fn write_order(writer: &mut BitWriter, order: QuantizerOrder, bits_remaining: &mut usize) {
    if *bits_remaining <= MIN_ORDER_BUDGET {
        return;
    }
    if order.is_zero() {
        writer.write_bit(false);
        *bits_remaining -= 1;
        return;
    }

    let ones = order.value() - 1;
    let terminate = order_fit(order, *bits_remaining) != OrderFit::ImplicitStop;
    writer.write_unary(ones, terminate);
    *bits_remaining = bits_remaining.saturating_sub(ones as usize + usize::from(terminate));
}
