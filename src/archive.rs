use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Extracts every entry of `zip_path` below `extract_dir`, returning the
/// number of files written. Entry names are sanitised so nothing lands
/// outside `extract_dir`.
pub fn extract_zip(zip_path: &Path, extract_dir: &Path) -> Result<usize> {
    log::info!("Extracting ZIP to {:?}", extract_dir);

    let file = fs::File::open(zip_path).context("Failed to open ZIP file")?;

    let mut archive = zip::ZipArchive::new(file).context("Failed to read ZIP archive")?;

    let mut files = 0;
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .context("Failed to read file from ZIP")?;

        let outpath = extract_dir.join(entry.mangled_name());

        if entry.is_dir() {
            fs::create_dir_all(&outpath)?;
        } else {
            if let Some(p) = outpath.parent() {
                fs::create_dir_all(p)?;
            }
            let mut outfile =
                fs::File::create(&outpath).context("Failed to create extracted file")?;
            std::io::copy(&mut entry, &mut outfile).context("Failed to write extracted file")?;
            files += 1;
        }
    }

    log::info!("ZIP extraction completed: {} files", files);
    Ok(files)
}

/// Moves `source_dir` to `target_dir`, replacing whatever is there.
/// Falls back to a recursive copy when a rename is not possible
/// (e.g. across filesystems).
pub fn replace_dir(source_dir: &Path, target_dir: &Path) -> Result<()> {
    log::info!("Placing {:?} at {:?}", source_dir, target_dir);

    if target_dir.exists() {
        fs::remove_dir_all(target_dir).context("Failed to remove previous directory")?;
    }

    if let Some(parent) = target_dir.parent() {
        fs::create_dir_all(parent).context("Failed to create parent directory")?;
    }

    fs::rename(source_dir, target_dir)
        .or_else(|_| copy_dir_all(source_dir, target_dir))
        .context("Failed to move/copy directory")?;

    Ok(())
}

fn copy_dir_all(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let ty = entry.file_type()?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if ty.is_dir() {
            copy_dir_all(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}
