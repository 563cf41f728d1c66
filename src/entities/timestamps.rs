//! Shared creation/modification timestamps for every stored record.
//!
//! Each entity carries `created` and `modified` columns. They are assigned in
//! the entity's `before_save` hook through [`stamp`], so callers never set
//! them by hand. The `created_*` helpers filter either an in-memory
//! collection ([`created_after`] and friends) or a query
//! ([`TimestampedEntity`]).

use sea_orm::{ActiveValue, QueryFilter, Select, entity::prelude::*};

/// The creation/modification pair carried by every record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timestamps {
    /// Set once, when the record is inserted
    pub created: DateTimeUtc,
    /// Set on every successful write
    pub modified: DateTimeUtc,
}

/// Implemented by every model that carries [`Timestamps`].
pub trait Timestamped {
    /// Returns the record's timestamps.
    fn timestamps(&self) -> Timestamps;

    /// When the record was inserted.
    fn created(&self) -> DateTimeUtc {
        self.timestamps().created
    }

    /// When the record was last written.
    fn modified(&self) -> DateTimeUtc {
        self.timestamps().modified
    }
}

impl<T: Timestamped> Timestamped for &T {
    fn timestamps(&self) -> Timestamps {
        (*self).timestamps()
    }
}

/// Assigns `created`/`modified` for a pending write.
///
/// On insert, `created` is only filled when the caller left it unset, which
/// lets imports carry their original creation time.
pub fn stamp(
    created: &mut ActiveValue<DateTimeUtc>,
    modified: &mut ActiveValue<DateTimeUtc>,
    insert: bool,
) {
    let now = chrono::Utc::now();
    if insert && created.is_not_set() {
        *created = ActiveValue::Set(now);
    }
    *modified = ActiveValue::Set(now);
}

/// Records created strictly after `after`.
pub fn created_after<I, T>(records: I, after: DateTimeUtc) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Timestamped,
{
    records.into_iter().filter(|r| r.created() > after).collect()
}

/// Records created strictly before `before`.
pub fn created_before<I, T>(records: I, before: DateTimeUtc) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Timestamped,
{
    records.into_iter().filter(|r| r.created() < before).collect()
}

/// Records created within `[start, end]`, both ends inclusive.
pub fn created_between<I, T>(records: I, start: DateTimeUtc, end: DateTimeUtc) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Timestamped,
{
    records
        .into_iter()
        .filter(|r| {
            let created = r.created();
            created >= start && created <= end
        })
        .collect()
}

/// Query-side counterpart of the `created_*` helpers.
pub trait TimestampedEntity: EntityTrait {
    /// The column holding the creation timestamp.
    fn created_column() -> Self::Column;

    /// `SELECT ... WHERE created > after`
    fn find_created_after(after: DateTimeUtc) -> Select<Self> {
        Self::find().filter(Self::created_column().gt(after))
    }

    /// `SELECT ... WHERE created < before`
    fn find_created_before(before: DateTimeUtc) -> Select<Self> {
        Self::find().filter(Self::created_column().lt(before))
    }

    /// `SELECT ... WHERE created BETWEEN start AND end`
    fn find_created_between(start: DateTimeUtc, end: DateTimeUtc) -> Select<Self> {
        Self::find().filter(Self::created_column().between(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[derive(Debug, Clone, PartialEq)]
    struct Stub {
        id: i64,
        created: DateTimeUtc,
    }

    impl Timestamped for Stub {
        fn timestamps(&self) -> Timestamps {
            Timestamps {
                created: self.created,
                modified: self.created,
            }
        }
    }

    fn base() -> DateTimeUtc {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn stubs() -> Vec<Stub> {
        (0..5)
            .map(|i| Stub {
                id: i,
                created: base() + Duration::hours(i),
            })
            .collect()
    }

    fn ids(records: &[&Stub]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_created_between_is_inclusive() {
        let records = stubs();
        let found = created_between(&records, base() + Duration::hours(1), base() + Duration::hours(3));
        assert_eq!(ids(&found), vec![1, 2, 3]);
    }

    #[test]
    fn test_created_after_and_before_are_strict() {
        let records = stubs();
        let after = created_after(&records, base() + Duration::hours(2));
        assert_eq!(ids(&after), vec![3, 4]);

        let before = created_before(&records, base() + Duration::hours(2));
        assert_eq!(ids(&before), vec![0, 1]);
    }

    #[test]
    fn test_filters_on_empty_collection() {
        let records: Vec<Stub> = Vec::new();
        assert!(created_after(&records, base()).is_empty());
        assert!(created_before(&records, base()).is_empty());
        assert!(created_between(&records, base(), base()).is_empty());
    }

    #[test]
    fn test_stamp_insert_and_update() {
        let mut created = ActiveValue::NotSet;
        let mut modified = ActiveValue::NotSet;
        stamp(&mut created, &mut modified, true);
        assert!(created.is_set());
        assert!(modified.is_set());

        let mut created = ActiveValue::Unchanged(base());
        let mut modified = ActiveValue::Unchanged(base());
        stamp(&mut created, &mut modified, false);
        assert_eq!(created, ActiveValue::Unchanged(base()));
        assert!(matches!(modified, ActiveValue::Set(ts) if ts > base()));
    }

    #[test]
    fn test_stamp_keeps_explicit_created() {
        let mut created = ActiveValue::Set(base());
        let mut modified = ActiveValue::NotSet;
        stamp(&mut created, &mut modified, true);
        assert_eq!(created, ActiveValue::Set(base()));
    }
}
