//! Internal Diesel row structs. Never exposed outside the persistence layer.

use diesel::prelude::*;

use super::schema::{tasks, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub passport_series: String,
    pub passport_number: String,
}

/// Insert and full-replace payload for the users table.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserFields<'a> {
    pub name: &'a str,
    pub passport_series: &'a str,
    pub passport_number: &'a str,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub(crate) struct NewTaskRow<'a> {
    pub user_id: i32,
    pub description: &'a str,
    pub status: &'a str,
    pub rate: i32,
    pub deadline: i32,
    pub earned: f64,
}

/// Task joined with its owner's name, in the column order of
/// [`task_listing_columns`].
#[derive(Debug, Clone, Queryable)]
pub(crate) struct TaskListingRow {
    pub id: i32,
    pub user_id: i32,
    pub owner_name: String,
    pub description: String,
    pub status: String,
    pub rate: i32,
    pub deadline: i32,
    pub earned: f64,
}

pub(crate) fn task_listing_columns() -> (
    tasks::id,
    tasks::user_id,
    users::name,
    tasks::description,
    tasks::status,
    tasks::rate,
    tasks::deadline,
    tasks::earned,
) {
    (
        tasks::id,
        tasks::user_id,
        users::name,
        tasks::description,
        tasks::status,
        tasks::rate,
        tasks::deadline,
        tasks::earned,
    )
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ActiveTaskRow {
    pub id: i32,
    pub rate: i32,
    pub earned: f64,
    pub deadline: i32,
}
