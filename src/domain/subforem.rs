/// A tenant: a sub-site scoped to its own domain.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Subforem {
    pub id: i64,
    pub domain: String,
}
