//! Diesel table definitions. Must match `backend/migrations`.

diesel::table! {
    users (id) {
        id -> Int4,
        name -> Varchar,
        passport_series -> Varchar,
        passport_number -> Varchar,
    }
}

diesel::table! {
    /// `status` holds a `TaskStatus` token; `deadline` counts remaining
    /// accrual ticks.
    tasks (id) {
        id -> Int4,
        user_id -> Int4,
        description -> Text,
        status -> Varchar,
        rate -> Int4,
        deadline -> Int4,
        earned -> Float8,
    }
}

diesel::joinable!(tasks -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(tasks, users);
