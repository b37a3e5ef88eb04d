//! SQLite schema definition

/// SQL schema for the movie database
pub const SCHEMA_SQL: &str = r#"
-- Movies: titles collected by the import step
CREATE TABLE IF NOT EXISTS movies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

-- Release dates: unique date strings referenced by metadata rows
CREATE TABLE IF NOT EXISTS release_dates (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    value TEXT NOT NULL UNIQUE
);

-- Metadata: one row per attempted TMDB lookup.
-- A row with NULL tmdb_id means the lookup found no match.
CREATE TABLE IF NOT EXISTS metadata (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    movie_id INTEGER NOT NULL UNIQUE REFERENCES movies(id),
    tmdb_id INTEGER UNIQUE,
    release_date_id INTEGER REFERENCES release_dates(id),
    revenue INTEGER NOT NULL DEFAULT 0,
    overview TEXT,
    fetched_at TEXT NOT NULL
);

-- Plots: one row per attempted plot lookup.
-- A row with NULL summary means the lookup found no plot.
CREATE TABLE IF NOT EXISTS plots (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    movie_id INTEGER NOT NULL UNIQUE REFERENCES movies(id),
    summary TEXT,
    fetched_at TEXT NOT NULL
);

-- Genres: unique genre names
CREATE TABLE IF NOT EXISTS genres (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

-- MovieGenres: links movies to genres
CREATE TABLE IF NOT EXISTS movie_genres (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    movie_id INTEGER NOT NULL REFERENCES movies(id),
    genre_id INTEGER NOT NULL REFERENCES genres(id),
    UNIQUE(movie_id, genre_id)
);

-- Categories: unique subject category names
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

-- MovieCategories: links movies to categories
CREATE TABLE IF NOT EXISTS movie_categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    movie_id INTEGER NOT NULL REFERENCES movies(id),
    category_id INTEGER NOT NULL REFERENCES categories(id),
    UNIQUE(movie_id, category_id)
);

-- Subjects: one classification per movie; recomputation overwrites
CREATE TABLE IF NOT EXISTS subjects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    movie_id INTEGER NOT NULL UNIQUE REFERENCES movies(id),
    category_id INTEGER NOT NULL REFERENCES categories(id),
    occupation TEXT,
    is_person INTEGER NOT NULL,
    classified_at TEXT NOT NULL
);

-- Indexes for performance
CREATE INDEX IF NOT EXISTS idx_metadata_movie ON metadata(movie_id);
CREATE INDEX IF NOT EXISTS idx_plots_movie ON plots(movie_id);
CREATE INDEX IF NOT EXISTS idx_movie_genres_movie ON movie_genres(movie_id);
CREATE INDEX IF NOT EXISTS idx_movie_categories_movie ON movie_categories(movie_id);
CREATE INDEX IF NOT EXISTS idx_subjects_category ON subjects(category_id);
"#;
