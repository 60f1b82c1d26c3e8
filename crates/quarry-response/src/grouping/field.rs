use roxmltree::Node;
use tracing::{trace, warn};

use crate::document::DocumentParser;
use crate::model::{Group, GroupedResults};
use crate::node::{elements, named_child, optional_int_child, required_int_child, tagged_child};

use super::doclist;

pub(crate) fn decode<P: DocumentParser>(
    clause: Node<'_, '_>,
    documents: &P,
    null_value: &str,
) -> Result<GroupedResults<P::Record>, P::Error> {
    let matches = required_int_child(clause, "matches")?;
    let declared = optional_int_child(clause, "ngroups")?;

    let mut groups = Vec::new();
    let entries = tagged_child(clause, "arr", "groups")
        .into_iter()
        .flat_map(elements)
        .filter(|n| n.has_tag_name("lst"));
    for entry in entries {
        let Some(marker) = named_child(entry, "groupValue") else {
            warn!("skipping group entry without groupValue");
            continue;
        };
        let group_value = if marker.has_tag_name("null") {
            null_value.to_string()
        } else {
            marker.text().unwrap_or_default().to_string()
        };

        let (num_found, docs) = doclist(entry, documents)?;
        trace!(group_value = %group_value, num_found, "decoded field group");
        groups.push(Group {
            group_value,
            num_found,
            documents: docs,
        });
    }

    Ok(GroupedResults {
        groups,
        matches,
        // Only reported when the request asked for group.ngroups.
        ngroups: declared,
    })
}
