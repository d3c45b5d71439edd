// Diesel table definitions.
// Keep in sync with `DbContext::init_schema`.

diesel::table! {
    documents (id) {
        id -> Integer,
        filename -> Text,
        upload_date -> Text,
        status -> Text,
        summary -> Nullable<Text>,
        full_text -> Nullable<Text>,
        model_used -> Nullable<Text>,
    }
}

diesel::table! {
    history_events (id) {
        id -> Integer,
        event_type -> Text,
        document_name -> Text,
        timestamp -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(documents, history_events);
