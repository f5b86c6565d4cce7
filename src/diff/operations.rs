use super::types::DiffOperation;
use crate::error::{EngineError, Result};

/// Walk both token sequences against their LCS and emit the edit script.
///
/// A token is only treated as common when it is the next LCS token on both
/// sides at once; otherwise the original side is drained first (deletes)
/// before the modified side (inserts). Every token of `original` and
/// `modified` is accounted for exactly once.
pub fn generate_operations(
    original: &[String],
    modified: &[String],
    lcs: &[String],
) -> Result<Vec<DiffOperation>> {
    let mut operations = Vec::with_capacity(original.len() + modified.len());
    let (mut i, mut j, mut k) = (0, 0, 0);

    while i < original.len() || j < modified.len() {
        let next_common = lcs.get(k);
        let orig_token = original.get(i);
        let mod_token = modified.get(j);

        match (next_common, orig_token, mod_token) {
            (Some(common), Some(a), Some(b)) if a == common && b == common => {
                operations.push(DiffOperation::Equal {
                    token: a.clone(),
                    original_index: i,
                    modified_index: j,
                });
                i += 1;
                j += 1;
                k += 1;
            }
            (common, Some(a), _) if common != Some(a) => {
                operations.push(DiffOperation::Delete {
                    token: a.clone(),
                    original_index: i,
                });
                i += 1;
            }
            (_, _, Some(b)) => {
                operations.push(DiffOperation::Insert {
                    token: b.clone(),
                    modified_index: j,
                });
                j += 1;
            }
            (_, _, None) => {
                return Err(EngineError::internal(format!(
                    "edit script stalled at original {i}, modified {j}, lcs {k}"
                )));
            }
        }
    }

    if k != lcs.len() {
        return Err(EngineError::internal(format!(
            "edit script consumed {k} of {} common tokens",
            lcs.len()
        )));
    }

    Ok(operations)
}
