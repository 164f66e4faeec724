// Coverage scoring: is a lesson already represented in the deck?
//
// `analyzer` matches lessons against individual batches; `risk` pools the
// whole master deck for a pre-conversion duplication check. Both classify
// scores with the same configurable tiers.

pub mod analyzer;
pub mod batches;
pub mod risk;
pub mod tier;
