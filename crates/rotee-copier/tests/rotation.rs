use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Result, anyhow};
use rotee_config::{OpenMode, TeeConfig};
use rotee_copier::{CopyReport, Copier};
use rotee_test_support::scratch_dir;
use tokio::io::{AsyncWriteExt, DuplexStream, duplex};
use tokio::time::{sleep, timeout};

async fn wait_for_contents(path: &Path, expected: &[u8]) -> Result<()> {
    timeout(Duration::from_secs(5), async {
        loop {
            if fs::read(path).is_ok_and(|contents| contents == expected) {
                return;
            }
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .map_err(|_| anyhow!("timed out waiting for {} to settle", path.display()))
}

async fn drive(
    mut producer: DuplexStream,
    path: &Path,
    rotate: impl FnOnce(&Path) -> std::io::Result<()>,
) -> Result<()> {
    producer.write_all(b"AAAA").await?;
    wait_for_contents(path, b"AAAA").await?;
    rotate(path)?;
    producer.write_all(b"BBBB").await?;
    producer.shutdown().await?;
    Ok(())
}

async fn run_scenario(
    mode: OpenMode,
    rotate: impl FnOnce(&Path) -> std::io::Result<()>,
) -> Result<(tempfile::TempDir, Vec<u8>, CopyReport)> {
    let dir = scratch_dir()?;
    let path = dir.path().join("out.log");
    let config = TeeConfig::new(&path)?
        .with_mode(mode)
        .with_check_interval(Duration::ZERO);
    let (producer, consumer) = duplex(64);
    let mut secondary = Vec::new();

    let (copied, driven) = tokio::join!(
        Copier::new(config, consumer, &mut secondary).run(),
        drive(producer, &path, rotate),
    );
    driven?;
    let report = copied?;
    Ok((dir, secondary, report))
}

#[tokio::test]
async fn delete_and_recreate_switches_to_the_new_file() -> Result<()> {
    let (dir, secondary, report) = run_scenario(OpenMode::Truncate, |path| {
        fs::remove_file(path)?;
        fs::write(path, b"")
    })
    .await?;

    assert_eq!(secondary, b"AAAABBBB");
    assert_eq!(fs::read(dir.path().join("out.log"))?, b"BBBB");
    assert_eq!(report.reopens, 1);
    Ok(())
}

#[tokio::test]
async fn logrotate_style_move_keeps_old_content_in_rotated_file() -> Result<()> {
    let (dir, secondary, report) = run_scenario(OpenMode::Append, |path| {
        fs::rename(path, path.with_extension("log.1"))
    })
    .await?;

    assert_eq!(secondary, b"AAAABBBB");
    assert_eq!(fs::read(dir.path().join("out.log.1"))?, b"AAAA");
    assert_eq!(fs::read(dir.path().join("out.log"))?, b"BBBB");
    assert_eq!(report.reopens, 1);
    Ok(())
}

#[tokio::test]
async fn swapped_in_replacement_is_detected() -> Result<()> {
    let (dir, secondary, report) = run_scenario(OpenMode::Append, |path| {
        let staged = path.with_extension("staged");
        fs::write(&staged, b"header\n")?;
        fs::rename(&staged, path)
    })
    .await?;

    assert_eq!(secondary, b"AAAABBBB");
    assert_eq!(fs::read(dir.path().join("out.log"))?, b"header\nBBBB");
    assert_eq!(report.reopens, 1);
    Ok(())
}

#[tokio::test]
async fn in_place_truncation_is_not_a_rotation() -> Result<()> {
    let (dir, secondary, report) = run_scenario(OpenMode::Append, |path| {
        fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(path)
            .map(drop)
    })
    .await?;

    assert_eq!(secondary, b"AAAABBBB");
    assert_eq!(fs::read(dir.path().join("out.log"))?, b"BBBB");
    assert_eq!(report.reopens, 0);
    Ok(())
}
