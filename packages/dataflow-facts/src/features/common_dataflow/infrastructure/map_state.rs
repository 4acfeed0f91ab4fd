//! Map-backed memory state over [`SimpleType`]

use super::simple_type::SimpleType;
use crate::features::common_dataflow::domain::{DfaValue, SpecialField};
use crate::features::common_dataflow::ports::MemoryState;
use crate::shared::models::VarId;
use rustc_hash::FxHashMap;

/// Memory state: variable → type, plus special-field bookkeeping
///
/// Unknown variables have type `Top`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapState {
    vars: FxHashMap<VarId, SimpleType>,
    special_fields: FxHashMap<VarId, SpecialField>,
    field_types: FxHashMap<(VarId, SpecialField), SimpleType>,
    assertions_flag: Option<VarId>,
}

impl MapState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: &str, ty: SimpleType) -> Self {
        self.set_var(name, ty);
        self
    }

    /// Declare that `name` carries `field` (by its declared type)
    pub fn with_special_field(mut self, name: &str, field: SpecialField) -> Self {
        self.special_fields.insert(VarId::new(name), field);
        self
    }

    pub fn with_field_type(mut self, name: &str, field: SpecialField, ty: SimpleType) -> Self {
        self.field_types.insert((VarId::new(name), field), ty);
        self
    }

    /// Name of the synthetic "assertions disabled" variable
    pub fn with_assertions_flag(mut self, name: &str) -> Self {
        self.assertions_flag = Some(VarId::new(name));
        self
    }

    pub fn set_var(&mut self, name: &str, ty: SimpleType) {
        self.vars.insert(VarId::new(name), ty);
    }

    pub fn var(&self, name: &str) -> SimpleType {
        self.vars
            .get(&VarId::new(name))
            .cloned()
            .unwrap_or(SimpleType::Top)
    }
}

impl MemoryState for MapState {
    type Type = SimpleType;

    fn type_of(&self, value: &DfaValue<SimpleType>) -> SimpleType {
        match value {
            DfaValue::Typed(ty) => ty.clone(),
            DfaValue::Variable(var) => self.vars.get(var).cloned().unwrap_or(SimpleType::Top),
            // freshly created container object
            DfaValue::Wrapped { .. } => SimpleType::not_null(),
            DfaValue::ContractFail => SimpleType::Bottom,
        }
    }

    fn special_field_of(&self, var: &VarId) -> Option<SpecialField> {
        self.special_fields.get(var).copied()
    }

    fn special_field_type(&self, qualifier: &VarId, field: SpecialField) -> SimpleType {
        self.field_types
            .get(&(qualifier.clone(), field))
            .cloned()
            .unwrap_or(SimpleType::Top)
    }

    fn assertions_disabled_var(&self) -> Option<VarId> {
        self.assertions_flag.clone()
    }
}
