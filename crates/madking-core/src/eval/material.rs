use super::Evaluator;
use crate::position::Position;
use crate::types::Value;

/// Guards minus Dragons
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEval;

impl Evaluator for MaterialEval {
    #[inline]
    fn evaluate(&self, pos: &Position) -> Value {
        Value::new(pos.guard_count() as i32 - pos.dragon_count() as i32)
    }

    fn name(&self) -> &str {
        "material"
    }
}
