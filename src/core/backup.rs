use crate::config::Config;
use crate::db::log::rtlog;
use crate::errors::AppResult;
use crate::ui::messages;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    pub fn backup(cfg: &Config, dest_file: &str, compress: bool) -> AppResult<()> {
        let src = Path::new(&cfg.database);
        let dest = Path::new(dest_file);

        //
        // 1. Check DB exists
        //
        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        //
        // 2. Ensure destination folder exists
        //
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        //
        // 3. If destination file exists → ask confirmation
        //
        if dest.exists()
            && !messages::confirm(&format!(
                "The file '{}' already exists. Overwrite it?",
                dest.display()
            ))
        {
            messages::info("Backup cancelled.");
            return Ok(());
        }

        //
        // 4. Copy database, optionally compress
        //
        fs::copy(src, dest)?;
        messages::success(format!("Backup created: {}", dest.display()));

        let final_path = if compress {
            let compressed = compress_backup(dest)?;

            if compressed != dest.to_path_buf() {
                // remove uncompressed copy
                if let Err(e) = fs::remove_file(dest) {
                    messages::warning(format!("Failed to remove uncompressed backup: {}", e));
                }
            }

            compressed
        } else {
            dest.to_path_buf()
        };

        //
        // 5. Log in DB
        //
        if let Ok(conn) = Connection::open(src) {
            let _ = rtlog(
                &conn,
                "backup",
                &final_path.to_string_lossy(),
                if compress {
                    "Backup created and compressed"
                } else {
                    "Backup created"
                },
            );
        }

        Ok(())
    }
}

/// Compress a backup using .zip
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "database.sqlite".to_string());
    zip.start_file(name, options).map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    messages::success(format!("Compressed: {}", zip_path.display()));

    Ok(zip_path)
}
