//! SQLite has no server-side databases; a worker namespace is a database
//! file `{name}.db` inside a configured directory.

use andamios_core::{
    async_trait,
    backend::{Backend, BackendKind},
    err, DatabaseName, Error, Result,
};
use rusqlite::{Connection, OpenFlags};
use std::{
    borrow::Cow,
    fs, io,
    path::{Path, PathBuf},
};
use url::Url;

const EXTENSION: &str = "db";

/// Files SQLite may leave next to a database.
const SIDE_FILE_SUFFIXES: [&str; 3] = ["-wal", "-shm", "-journal"];

/// Written into the header of every database this backend creates ("ANDA").
const APPLICATION_ID: i32 = 0x414e_4441;

#[derive(Debug)]
pub struct Sqlite {
    dir: PathBuf,
}

impl Sqlite {
    /// Create a SQLite backend from a `sqlite:<directory>` URL.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(|err| {
            Error::invalid_connection_url(format!("{err}; url={url_str}"))
        })?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        match url.path() {
            "" => Err(Error::invalid_connection_url(format!(
                "missing directory in connection URL; url={url_str}"
            ))),
            ":memory:" => Err(Error::invalid_connection_url(
                "in-memory SQLite cannot hold per-worker databases; use `sqlite:<directory>`",
            )),
            path => Ok(Self::open_dir(path)),
        }
    }

    /// Keep worker databases in the specified directory
    pub fn open_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the database file for a worker namespace.
    pub fn database_path(&self, name: &DatabaseName) -> PathBuf {
        self.dir.join(format!("{name}.{EXTENSION}"))
    }
}

#[async_trait]
impl Backend for Sqlite {
    fn kind(&self) -> BackendKind {
        BackendKind::Sqlite
    }

    fn url(&self) -> Cow<'_, str> {
        Cow::Owned(format!("sqlite:{}", self.dir.display()))
    }

    async fn drop_database_if_exists(&self, name: &DatabaseName) -> Result<()> {
        let path = self.database_path(name);
        tracing::debug!(path = %path.display(), "removing database file");

        tokio::task::spawn_blocking(move || remove_database_files(&path))
            .await
            .map_err(Error::backend)?
    }

    async fn create_database(&self, name: &DatabaseName) -> Result<()> {
        let dir = self.dir.clone();
        let path = self.database_path(name);
        tracing::debug!(path = %path.display(), "creating database file");

        tokio::task::spawn_blocking(move || create_database_file(&dir, &path))
            .await
            .map_err(Error::backend)?
    }

    async fn list_databases(&self) -> Result<Vec<String>> {
        let dir = self.dir.clone();

        tokio::task::spawn_blocking(move || list_database_files(&dir))
            .await
            .map_err(Error::backend)?
    }
}

fn remove_database_files(path: &Path) -> Result<()> {
    remove_if_exists(path)?;

    for suffix in SIDE_FILE_SUFFIXES {
        let mut side = path.as_os_str().to_owned();
        side.push(suffix);
        remove_if_exists(Path::new(&side))?;
    }

    Ok(())
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(Error::backend(e)),
        _ => Ok(()),
    }
}

fn create_database_file(dir: &Path, path: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;

    // Claim the path atomically; an empty file is a valid empty database.
    match fs::OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(err!("database file `{}` already exists", path.display()));
        }
        Err(e) => return Err(Error::backend(e)),
    }

    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE)
        .map_err(Error::backend)?;

    // Forces SQLite to write the database header.
    conn.pragma_update(None, "application_id", APPLICATION_ID)
        .map_err(Error::backend)?;

    Ok(())
}

fn list_database_files(dir: &Path) -> Result<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
        Err(e) => return Err(Error::backend(e)),
    };

    let mut names = vec![];

    for entry in entries {
        let path = entry?.path();

        if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
            continue;
        }

        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            names.push(stem.to_string());
        }
    }

    names.sort();
    Ok(names)
}
