/// Per-request facts every resolution step may consult.
///
/// Built fresh for each request and passed explicitly, so nothing tenant-scoped can survive
/// from one request into the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Tenant the request was addressed to, when its host belongs to a known subforem.
    pub subforem_id: Option<i64>,
    pub host: Option<String>,
}

impl RequestContext {
    pub fn for_subforem(subforem_id: i64) -> Self {
        Self {
            subforem_id: Some(subforem_id),
            host: None,
        }
    }
}
