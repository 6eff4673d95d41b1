//! Lint rule implementations.
//!
//! [`register_builtin_rules`] is the single place listing every built-in
//! rule; the registration order here is the order diagnostics are reported in.

use super::registry::RuleRegistry;
use crate::error::RegistryError;

pub mod al_001;
pub mod al_002;
pub mod al_003;
pub mod al_004;
pub mod al_005;
pub mod al_006;
pub mod am_001;
pub mod am_002;
pub mod am_003;
pub mod am_004;
pub mod am_005;
pub mod am_006;
pub mod am_007;
pub mod cv_001;
pub mod cv_002;
pub mod cv_003;
pub mod cv_004;
pub mod cv_005;
pub mod cv_006;
pub mod rf_001;
pub mod rf_002;
pub mod rf_003;
pub mod rf_004;
pub mod rf_005;
pub mod st_001;
pub mod st_002;
pub mod st_003;
pub mod st_004;
pub mod st_005;
pub mod st_006;
pub mod st_007;
pub mod st_008;
pub mod st_009;

/// Registers every built-in rule into `registry`.
pub fn register_builtin_rules(registry: &mut RuleRegistry) -> Result<(), RegistryError> {
    registry.register(Box::new(al_001::ExpressionAlias))?;
    registry.register(Box::new(al_002::UniqueTableAlias))?;
    registry.register(Box::new(al_003::UniqueColumnAlias))?;
    registry.register(Box::new(al_004::AliasLength))?;
    registry.register(Box::new(al_005::SelfAliasColumn))?;
    registry.register(Box::new(al_006::UnusedTableAlias))?;

    registry.register(Box::new(am_001::DistinctWithGroupBy))?;
    registry.register(Box::new(am_002::BareUnion))?;
    registry.register(Box::new(am_003::AmbiguousOrderBy))?;
    registry.register(Box::new(am_004::SetOperationColumnCount))?;
    registry.register(Box::new(am_005::BareJoin))?;
    registry.register(Box::new(am_006::AmbiguousColumnReferences))?;
    registry.register(Box::new(am_007::MissingJoinCondition))?;

    registry.register(Box::new(cv_001::PreferCoalesce))?;
    registry.register(Box::new(cv_002::CountRows))?;
    registry.register(Box::new(cv_003::IsNullComparison))?;
    registry.register(Box::new(cv_004::PreferLeftJoin))?;
    registry.register(Box::new(cv_005::CastingStyle))?;
    registry.register(Box::new(cv_006::CaseAsCoalesce))?;

    registry.register(Box::new(st_001::UnusedCte))?;
    registry.register(Box::new(st_002::UnnecessaryElseNull))?;
    registry.register(Box::new(st_003::NestedCase))?;
    registry.register(Box::new(st_004::JoinUsing))?;
    registry.register(Box::new(st_005::Subquery))?;
    registry.register(Box::new(st_006::ColumnOrder))?;
    registry.register(Box::new(st_007::DistinctParentheses))?;
    registry.register(Box::new(st_008::JoinConditionOrder))?;
    registry.register(Box::new(st_009::ConstantExpression))?;

    registry.register(Box::new(rf_001::ReferencesFrom))?;
    registry.register(Box::new(rf_002::ReferencesQualification))?;
    registry.register(Box::new(rf_003::ReferencesConsistent))?;
    registry.register(Box::new(rf_004::ReferencesKeywords))?;
    registry.register(Box::new(rf_005::ReferencesSpecialChars))?;

    Ok(())
}
