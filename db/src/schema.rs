table! {
    events (id) {
        id -> Uuid,
        name -> Text,
        description -> Text,
        venue -> Text,
        event_date -> Timestamp,
        capacity -> Int4,
        price_in_cents -> Int8,
        available_tickets -> Int4,
        status -> Text,
        organizer_id -> Uuid,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    ticket_requests (id) {
        id -> Uuid,
        full_name -> Text,
        email -> Text,
        phone -> Text,
        message -> Nullable<Text>,
        quantity -> Int4,
        event_id -> Uuid,
        status -> Text,
        request_date -> Timestamp,
        processed_date -> Nullable<Timestamp>,
        processed_by -> Nullable<Uuid>,
        organizer_notes -> Nullable<Text>,
        preferred_contact_method -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    tickets (id) {
        id -> Uuid,
        ticket_code -> Text,
        qr_token -> Text,
        event_id -> Uuid,
        client_id -> Uuid,
        price_in_cents -> Int8,
        status -> Text,
        purchase_date -> Timestamp,
        used_at -> Nullable<Timestamp>,
        cancelled_at -> Nullable<Timestamp>,
        validated_by -> Nullable<Uuid>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    users (id) {
        id -> Uuid,
        full_name -> Text,
        email -> Text,
        phone -> Nullable<Text>,
        role -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

joinable!(events -> users (organizer_id));
joinable!(ticket_requests -> events (event_id));
joinable!(tickets -> events (event_id));
joinable!(tickets -> users (client_id));

allow_tables_to_appear_in_same_query!(events, ticket_requests, tickets, users,);
