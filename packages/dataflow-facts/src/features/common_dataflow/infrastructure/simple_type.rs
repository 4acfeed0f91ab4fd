/*
 * Simple Type Lattice
 *
 * Built-in `Lattice` implementation: constants, integral ranges and
 * reference facts (nullability, optional presence, size).
 *
 *                 Top
 *        /         |          \
 *   Range(a..b)  Reference{..}  other constants
 *       |          |
 *   Constant(int)  Constant(null | "str")
 *        \         |          /
 *                Bottom
 *
 * Joining incompatible categories goes to Top; meeting them goes to Bottom.
 */

use crate::features::common_dataflow::domain::{LongRange, SpecialField};
use crate::features::common_dataflow::ports::Lattice;
use crate::shared::models::ConstValue;
use serde::{Deserialize, Serialize};

/// Nullability of a reference value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Nullability {
    Null,
    NotNull,
    #[default]
    Unknown,
}

impl Nullability {
    fn join(self, other: Self) -> Self {
        if self == other {
            self
        } else {
            Nullability::Unknown
        }
    }

    fn meet(self, other: Self) -> Option<Self> {
        match (self, other) {
            (Nullability::Unknown, x) | (x, Nullability::Unknown) => Some(x),
            (a, b) if a == b => Some(a),
            _ => None,
        }
    }
}

/// Facts about a reference value; `None` facets mean "unknown"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RefFacts {
    pub nullability: Nullability,

    /// Optional-like containers: whether a value is present
    pub present: Option<bool>,

    /// Length or size of arrays, strings and collections
    pub size: Option<LongRange>,
}

impl RefFacts {
    pub fn with_nullability(nullability: Nullability) -> Self {
        Self {
            nullability,
            ..Self::default()
        }
    }

    fn join(&self, other: &Self) -> Self {
        Self {
            nullability: self.nullability.join(other.nullability),
            present: if self.present == other.present {
                self.present
            } else {
                None
            },
            size: match (self.size, other.size) {
                (Some(a), Some(b)) => Some(a.join(&b)),
                _ => None,
            },
        }
    }

    fn meet(&self, other: &Self) -> Option<Self> {
        let nullability = self.nullability.meet(other.nullability)?;
        let present = match (self.present, other.present) {
            (None, x) | (x, None) => x,
            (Some(a), Some(b)) if a == b => Some(a),
            _ => return None,
        };
        let size = match (self.size, other.size) {
            (None, x) | (x, None) => x,
            (Some(a), Some(b)) => Some(a.intersect(&b)?),
        };
        Some(Self {
            nullability,
            present,
            size,
        })
    }
}

/// Built-in abstract type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimpleType {
    Bottom,
    Constant(ConstValue),
    Range(LongRange),
    Reference(RefFacts),
    Top,
}

impl SimpleType {
    pub fn int(value: i64) -> Self {
        SimpleType::Constant(ConstValue::Int(value))
    }

    pub fn boolean(value: bool) -> Self {
        SimpleType::Constant(ConstValue::Bool(value))
    }

    pub fn str(value: impl Into<String>) -> Self {
        SimpleType::Constant(ConstValue::str(value))
    }

    pub fn null() -> Self {
        SimpleType::Constant(ConstValue::Null)
    }

    pub fn not_null() -> Self {
        SimpleType::Reference(RefFacts::with_nullability(Nullability::NotNull))
    }

    pub fn nullable() -> Self {
        SimpleType::Reference(RefFacts::default())
    }

    /// Ints and int ranges (chars are kept apart)
    fn int_range(&self) -> Option<LongRange> {
        match self {
            SimpleType::Constant(ConstValue::Int(value)) => Some(LongRange::singleton(*value)),
            SimpleType::Range(range) => Some(*range),
            _ => None,
        }
    }

    /// Reference view of null, string constants and references
    fn ref_facts(&self) -> Option<RefFacts> {
        match self {
            SimpleType::Constant(ConstValue::Null) => {
                Some(RefFacts::with_nullability(Nullability::Null))
            }
            SimpleType::Constant(ConstValue::Str(text)) => Some(RefFacts {
                nullability: Nullability::NotNull,
                present: None,
                size: Some(LongRange::singleton(text.chars().count() as i64)),
            }),
            SimpleType::Reference(facts) => Some(facts.clone()),
            _ => None,
        }
    }

    pub fn is_non_null(&self) -> bool {
        match self {
            SimpleType::Constant(value) => !value.is_null(),
            SimpleType::Range(_) => true,
            SimpleType::Reference(facts) => facts.nullability == Nullability::NotNull,
            SimpleType::Bottom | SimpleType::Top => false,
        }
    }

    /// Whether the constant `value` is described by this type
    pub fn admits(&self, value: &ConstValue) -> bool {
        match self {
            SimpleType::Top => true,
            SimpleType::Bottom => false,
            SimpleType::Constant(own) => own == value,
            SimpleType::Range(range) => {
                matches!(value, ConstValue::Int(v) if range.contains(*v))
            }
            SimpleType::Reference(facts) => match value {
                ConstValue::Null => {
                    facts.nullability != Nullability::NotNull
                        && facts.present.is_none()
                        && facts.size.is_none()
                }
                ConstValue::Str(text) => {
                    facts.nullability != Nullability::Null
                        && facts.present.is_none()
                        && facts
                            .size
                            .map_or(true, |size| size.contains(text.chars().count() as i64))
                }
                _ => false,
            },
        }
    }
}

impl Lattice for SimpleType {
    fn bottom() -> Self {
        SimpleType::Bottom
    }

    fn top() -> Self {
        SimpleType::Top
    }

    fn is_top(&self) -> bool {
        matches!(self, SimpleType::Top)
    }

    fn join(&self, other: &Self) -> Self {
        if self == other {
            return self.clone();
        }
        match (self, other) {
            (SimpleType::Bottom, x) | (x, SimpleType::Bottom) => x.clone(),
            (SimpleType::Top, _) | (_, SimpleType::Top) => SimpleType::Top,
            _ => {
                if let (Some(a), Some(b)) = (self.int_range(), other.int_range()) {
                    return SimpleType::Range(a.join(&b));
                }
                if let (Some(a), Some(b)) = (self.ref_facts(), other.ref_facts()) {
                    return SimpleType::Reference(a.join(&b));
                }
                SimpleType::Top
            }
        }
    }

    fn meet(&self, other: &Self) -> Self {
        if self == other {
            return self.clone();
        }
        match (self, other) {
            (SimpleType::Top, x) | (x, SimpleType::Top) => x.clone(),
            (SimpleType::Bottom, _) | (_, SimpleType::Bottom) => SimpleType::Bottom,
            (SimpleType::Constant(value), other) | (other, SimpleType::Constant(value)) => {
                if other.admits(value) {
                    SimpleType::Constant(value.clone())
                } else {
                    SimpleType::Bottom
                }
            }
            (SimpleType::Range(a), SimpleType::Range(b)) => {
                a.intersect(b).map_or(SimpleType::Bottom, SimpleType::Range)
            }
            (SimpleType::Reference(a), SimpleType::Reference(b)) => {
                a.meet(b).map_or(SimpleType::Bottom, SimpleType::Reference)
            }
            _ => SimpleType::Bottom,
        }
    }

    fn constant(&self) -> Option<ConstValue> {
        match self {
            SimpleType::Constant(value) => Some(value.clone()),
            SimpleType::Range(range) => range.as_singleton().map(ConstValue::Int),
            _ => None,
        }
    }

    fn is_reference(&self) -> bool {
        self.ref_facts().is_some()
    }

    fn drop_nullability(&self) -> Self {
        match self {
            SimpleType::Reference(facts) => SimpleType::Reference(RefFacts {
                nullability: Nullability::Unknown,
                ..facts.clone()
            }),
            SimpleType::Constant(ConstValue::Null) => SimpleType::nullable(),
            other => other.clone(),
        }
    }

    fn from_special_field(field: SpecialField, field_type: &Self) -> Self {
        if *field_type == SimpleType::Bottom {
            return SimpleType::Bottom;
        }
        let mut facts = RefFacts::with_nullability(Nullability::NotNull);
        match field {
            SpecialField::ArrayLength | SpecialField::StringLength | SpecialField::CollectionSize => {
                if let Some(range) = field_type.int_range() {
                    match range.intersect(&LongRange::new(0, i64::MAX)) {
                        Some(size) => facts.size = Some(size),
                        None => return SimpleType::Bottom,
                    }
                }
            }
            SpecialField::OptionalValue => {
                facts.present = match field_type {
                    SimpleType::Constant(ConstValue::Null) => Some(false),
                    other if other.is_non_null() => Some(true),
                    _ => None,
                };
            }
            SpecialField::Unbox => {}
        }
        SimpleType::Reference(facts)
    }

    fn integral_range(&self) -> Option<LongRange> {
        match self {
            SimpleType::Constant(value) => value.as_integral().map(LongRange::singleton),
            SimpleType::Range(range) => Some(*range),
            _ => None,
        }
    }
}
