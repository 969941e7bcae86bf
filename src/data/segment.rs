//! Segment definitions and component queries.

use crate::mapping::Timestamp;

crate::json_object! {
    /// A sequential restriction such as "within 2 visits".
    pub struct SegmentRuleRestriction {
        "id" => unit: String,
        "value" => value: String,
    }
}

crate::json_object! {
    /// A single rule inside a segment container.
    pub struct SegmentRule {
        "container" => container: SegmentContainer,
        "metric" => metric: String,
        "element" => element: String,
        "classification" => classification: String,
        "operator" => operator: String,
        "value" => value: String,
        "after" => after: SegmentRuleRestriction,
        "within" => within: SegmentRuleRestriction,
        "exclude" => exclude: bool,
        "name" => name: String,
    }
}

crate::json_object! {
    /// A hits, visits or visitors container of rules.
    pub struct SegmentContainer {
        "name" => name: String,
        "type" => container_type: String,
        "operator" => operator: String,
        "rules" => rules: Vec<SegmentRule>,
        "exclude" => exclude: bool,
    }
}

crate::json_object! {
    pub struct SegmentDefinition {
        "container" => container: SegmentContainer,
    }
}

crate::json_object! {
    /// Who a segment is shared with.
    pub struct SegmentShare {
        "type" => share_type: String,
        "name" => name: String,
    }
}

crate::json_object! {
    /// A saved segment.
    pub struct Segment {
        "id" => segment_id: String,
        "name" => name: String,
        "description" => description: String,
        "reportSuiteID" => rsid: String,
        "modified" => modified: Timestamp,
        "compatibility" => compatibility: Vec<String>,
        "favorite" => favorite: bool,
        "tags" => tags: Vec<String>,
        "shares" => shares: Vec<SegmentShare>,
        "owner" => owner: String,
        "definition" => definition: SegmentDefinition,
    }
}

crate::json_object! {
    /// Filters narrowing a segment or calculated metric listing.
    pub struct SegmentFilters {
        "name" => name: String,
        "tags" => tags: String,
        "owner" => owner: String,
        "reportSuiteID" => rsid: String,
        "approved" => approved: bool,
        "favorite" => favorite: bool,
    }
}

crate::json_object! {
    /// A listing request for segments or calculated metrics.
    pub struct ComponentQuery {
        "accessLevel" => access_level: String,
        "fields" => fields: Vec<String>,
        "selected" => selected: Vec<String>,
        "sort" => sort: String,
        "filters" => filters: SegmentFilters,
    }
}

impl ComponentQuery {
    /// Requests the given fields, with everything else left to the service.
    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: Some(fields.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }
}
