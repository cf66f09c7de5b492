pub const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

-- users table (ids come from the external auth provider)
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL,
    display_name TEXT,
    photo_url TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);

-- media_items table (dedup cache of catalog metadata)
CREATE TABLE IF NOT EXISTS media_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    external_id INTEGER NOT NULL,
    kind TEXT NOT NULL CHECK (kind IN ('movie', 'tv')),
    title TEXT NOT NULL,
    poster_path TEXT,
    backdrop_path TEXT,
    overview TEXT,
    release_date TEXT,
    vote_average REAL,
    episode_count INTEGER,
    runtime INTEGER,
    created_at TEXT NOT NULL,
    UNIQUE(external_id, kind)
);

-- watchlist_items table
CREATE TABLE IF NOT EXISTS watchlist_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    media_id INTEGER NOT NULL REFERENCES media_items(id),
    created_at TEXT NOT NULL,
    UNIQUE(user_id, media_id)
);

CREATE INDEX IF NOT EXISTS idx_watchlist_items_user ON watchlist_items(user_id, created_at DESC);

-- watched_items table
CREATE TABLE IF NOT EXISTS watched_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    media_id INTEGER NOT NULL REFERENCES media_items(id),
    rating INTEGER CHECK (rating IS NULL OR rating BETWEEN 0 AND 10),
    created_at TEXT NOT NULL,
    UNIQUE(user_id, media_id)
);

CREATE INDEX IF NOT EXISTS idx_watched_items_user ON watched_items(user_id, created_at DESC);

-- favorite_items table
CREATE TABLE IF NOT EXISTS favorite_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    media_id INTEGER NOT NULL REFERENCES media_items(id),
    created_at TEXT NOT NULL,
    UNIQUE(user_id, media_id)
);

CREATE INDEX IF NOT EXISTS idx_favorite_items_user ON favorite_items(user_id, created_at DESC);

-- lists table
CREATE TABLE IF NOT EXISTS lists (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0),
    description TEXT,
    is_public INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_lists_user ON lists(user_id);

-- list_items table
CREATE TABLE IF NOT EXISTS list_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    list_id INTEGER NOT NULL REFERENCES lists(id) ON DELETE CASCADE,
    media_id INTEGER NOT NULL REFERENCES media_items(id),
    status TEXT NOT NULL DEFAULT 'watched'
        CHECK (status IN ('watched', 'watchlist', 'watching', 'on hold', 'dropped')),
    seasons_watched INTEGER CHECK (seasons_watched IS NULL OR seasons_watched >= 0),
    created_at TEXT NOT NULL,
    UNIQUE(list_id, media_id)
);

CREATE INDEX IF NOT EXISTS idx_list_items_list ON list_items(list_id, created_at);
CREATE INDEX IF NOT EXISTS idx_list_items_media ON list_items(media_id);
"#;
