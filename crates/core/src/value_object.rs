//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. Two value objects with the same values are equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one from the old (e.g. a stock level after an increment).
///
/// - **Value Object**: `StockLevel { quantity: 10, max: 50 }`
/// - **Entity**: `Beer { id: BeerId(1), .. }`
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
