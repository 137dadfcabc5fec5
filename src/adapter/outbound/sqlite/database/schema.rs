// Diesel schema for the ledger database. Mirrors migrations/.

diesel::table! {
    ledger_tables (name) {
        name -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    ledger_rows (table_name, position) {
        table_name -> Text,
        position -> Integer,
        recorded_at -> Text,
        player_name -> Text,
        player_id -> Text,
        amount -> Text,
        competition_code -> Text,
        venue -> Text,
        status -> Text,
        archival_flag -> Text,
        group_id -> Text,
        payout -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(ledger_tables, ledger_rows);
