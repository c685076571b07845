//! Program record enrichment from catalog metadata.

use tracing::debug;

use syllabi_shared::ProgramRecord;

use crate::catalog::RegulationsCatalog;

/// Set `record.coordinator` from the catalog entry for its program.
///
/// Leaves the field absent when the program or its coordinator is missing.
/// Applying it twice yields the same record.
pub fn attach_coordinator(record: &mut ProgramRecord, catalog: &RegulationsCatalog) {
    let coordinator = catalog
        .get(&record.program_name)
        .and_then(|meta| meta.coordinator.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty());

    match coordinator {
        Some(name) => record.coordinator = Some(name.to_string()),
        None => debug!(program = %record.program_name, "no coordinator in catalog"),
    }
}
