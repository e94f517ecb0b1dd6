//! Generate static files

use anyhow::Result;
use notify::{RecursiveMode, Watcher};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::Blog;

/// Generate the static site
pub fn run(blog: &Blog) -> Result<()> {
    let start = Instant::now();

    let posts = blog.load_posts()?;
    let listed = posts.listed(blog.mode).count();
    tracing::info!(
        "Loaded {} posts ({} listed in {} mode)",
        posts.len(),
        listed,
        blog.mode
    );

    let generator = Generator::new(blog)?;
    let pages = generator.generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages into {:?} in {:.2}s",
        pages,
        blog.output_dir,
        duration.as_secs_f64()
    );

    Ok(())
}

/// Watch content, assets, and config for changes and regenerate
pub fn watch(blog: &Blog) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    for dir in [&blog.content_dir, &blog.assets_dir] {
        if dir.exists() {
            watcher.watch(dir, RecursiveMode::Recursive)?;
        }
    }

    let config_path = blog.config_path();
    if config_path.exists() {
        watcher.watch(&config_path, RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    // Debounce events
    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = reload(blog).and_then(|blog| run(&blog)) {
                        tracing::error!("Generation failed: {:#}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Re-read the config so edits to blog.yml apply without a restart
pub(crate) fn reload(blog: &Blog) -> Result<Blog> {
    Ok(Blog::new(&blog.base_dir)?.with_mode(blog.mode))
}
