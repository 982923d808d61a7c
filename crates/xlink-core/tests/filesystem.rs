//! End-to-end resolution against files on disk.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use xlink_config::HostConfig;
use xlink_core::{Hooks, ResolveError, Resolver, resolve};
use xlink_loader::FsLoader;

fn site() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("parts")).unwrap();
    fs::write(
        dir.path().join("index.html"),
        concat!(
            "<html><head>",
            r#"<link rel="stylesheet" href="site.css">"#,
            "</head><body>",
            r#"<x-link rel="x-include" href="parts/nav">"#,
            "<main>Home</main>",
            r#"<link rel="x-include" href="parts/debug" data-if="config.debug">"#,
            r#"<x-link rel="x-include" href="parts/nav">"#,
            "</body></html>",
        ),
    )
    .unwrap();
    fs::write(dir.path().join("site.css"), "body {}").unwrap();
    fs::write(dir.path().join("parts/nav.html"), "<nav>Menu</nav>").unwrap();
    fs::write(dir.path().join("parts/debug.html"), "<pre>debug</pre>").unwrap();
    dir
}

#[tokio::test]
async fn test_resolve_site_from_disk() {
    let dir = site();
    let loader = FsLoader::new(dir.path());

    let document = resolve("index", &loader, &HostConfig::new(), Hooks::default())
        .await
        .unwrap();
    assert_eq!(
        document,
        concat!(
            "<html><head></head><body>",
            "<nav>Menu</nav><main>Home</main><nav>Menu</nav>",
            "</body></html>",
        )
    );
}

#[tokio::test]
async fn test_condition_from_suffix() {
    let dir = site();
    let resolver = Resolver::new(FsLoader::new(dir.path()));

    let document = resolver.resolve("index!debug").await.unwrap();
    assert!(document.contains("<pre>debug</pre>"));
}

#[tokio::test]
async fn test_condition_from_host_config() {
    let dir = site();
    let host = HostConfig::from_toml_str("debug = true").unwrap();
    let resolver = Resolver::new(FsLoader::new(dir.path())).with_host(host);

    let document = resolver.resolve("index").await.unwrap();
    assert!(document.contains("<pre>debug</pre>"));

    let document = resolver.resolve("index!debug=false").await.unwrap();
    assert!(!document.contains("<pre>debug</pre>"));
}

#[tokio::test]
async fn test_missing_file_fails_whole_call() {
    let dir = site();
    fs::remove_file(dir.path().join("site.css")).unwrap();

    let err = Resolver::new(FsLoader::new(dir.path()))
        .resolve("index")
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::Load(_)));
}

#[tokio::test]
async fn test_host_config_file() {
    let dir = site();
    let config = dir.path().join("xlink.toml");
    fs::write(&config, "inclusionLoader = \"tpl\"\ndefaultInclusionExt = \"htm\"\n").unwrap();
    fs::write(dir.path().join("page.html"), r#"<link rel="include" href="parts/nav">"#).unwrap();
    fs::write(dir.path().join("parts/nav.htm"), "<nav>htm</nav>").unwrap();

    let host = HostConfig::load(Some(&config)).unwrap();
    let document = Resolver::new(FsLoader::new(dir.path()))
        .with_host(host)
        .resolve("page")
        .await
        .unwrap();
    assert_eq!(document, "<nav>htm</nav>");
}
