//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly. The unique
//! constraints on `follows`, `restaurant_likes`, and `visit_likes` are
//! load-bearing: they make the conflict-ignoring edge inserts race-safe.

diesel::table! {
    /// Registered expert profiles.
    users (id) {
        /// Primary key.
        id -> Int8,
        /// Unique credential handle.
        login_id -> Varchar,
        /// Display name.
        nickname -> Varchar,
        /// Profile introduction text.
        introduction -> Nullable<Text>,
        /// Expertise tag drawn from the static category set.
        category -> Nullable<Varchar>,
        /// Stored profile image reference.
        profile_image -> Nullable<Varchar>,
        /// Hashed credential, owned by the credential collaborator.
        password -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Directed follow edges; unique per ordered `(follower, following)` pair.
    follows (id) {
        /// Primary key; doubles as the stable listing order.
        id -> Int8,
        /// The user doing the following.
        follower_id -> Int8,
        /// The user being followed.
        following_id -> Int8,
        /// Edge creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered restaurants.
    restaurants (id) {
        /// Primary key.
        id -> Int8,
        /// Restaurant name.
        name -> Varchar,
        /// Street address.
        address -> Nullable<Varchar>,
        /// Contact number.
        phone_number -> Nullable<Varchar>,
        /// Place category from the search provider.
        category -> Nullable<Varchar>,
        /// Latitude of the place.
        latitude -> Float8,
        /// Longitude of the place.
        longitude -> Float8,
        /// External place-search identifier; unique to prevent duplicate
        /// registration from repeated searches.
        kakao_place_id -> Int8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Visit reviews.
    visits (id) {
        /// Primary key; monotonically assigned, used as the feed cursor.
        id -> Int8,
        /// Author.
        user_id -> Int8,
        /// Reviewed restaurant.
        restaurant_id -> Int8,
        /// Date of the visit being reviewed.
        visit_date -> Date,
        /// Free-text review body.
        review -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Restaurant like edges; unique per `(user, restaurant)` pair.
    restaurant_likes (id) {
        /// Primary key.
        id -> Int8,
        /// The liking user.
        user_id -> Int8,
        /// The liked restaurant.
        restaurant_id -> Int8,
        /// Edge creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Visit like edges; unique per `(user, visit)` pair.
    visit_likes (id) {
        /// Primary key.
        id -> Int8,
        /// The liking user.
        user_id -> Int8,
        /// The liked visit.
        visit_id -> Int8,
        /// Edge creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(visits -> restaurants (restaurant_id));
diesel::joinable!(visits -> users (user_id));
diesel::joinable!(visit_likes -> visits (visit_id));
diesel::joinable!(visit_likes -> users (user_id));
diesel::joinable!(restaurant_likes -> restaurants (restaurant_id));
diesel::joinable!(restaurant_likes -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    follows,
    restaurants,
    visits,
    restaurant_likes,
    visit_likes,
);
