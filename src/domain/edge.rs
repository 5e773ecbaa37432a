/// Stored edge weight. Edges run from the referenced (or called, or linked)
/// entity to the entity that references it:
///
/// - class `A` references class `B` → `B → A`
/// - `A:run` invokes `B:load` → `B:load → A:run`
/// - artifact `UC1` linked to `B` → `B → UC1`
///
/// Reachability marks edge targets, so a referencer becomes `reached`, never
/// the entity it references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UsedBy;
