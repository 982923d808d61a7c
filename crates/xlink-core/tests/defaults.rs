//! Process-wide defaults, kept in their own test binary since they mutate
//! shared state.

use pretty_assertions::assert_eq;
use xlink_config::{HostConfig, SettingValue, replace_default, reset_defaults};
use xlink_core::{Hooks, ResolveError, resolve};
use xlink_loader::MemoryLoader;

#[tokio::test]
async fn test_reconfigured_defaults_apply_to_later_calls() {
    let loader = MemoryLoader::new()
        .with_text(
            "text!page.html",
            r#"<tpl rel="include" href="nav"><link rel="include" href="nav">"#,
        )
        .with_text("view!nav.html", "V")
        .with_text("hbs!nav.html", "H");

    let before = resolve("page", &loader, &HostConfig::new(), Hooks::default())
        .await
        .unwrap();
    assert_eq!(before, r#"<tpl rel="include" href="nav">V"#);

    replace_default("inclusionLoader", "hbs".into()).unwrap();
    replace_default(
        "directiveTag",
        SettingValue::List(vec!["tpl".to_owned(), "link".to_owned()]),
    )
    .unwrap();

    let after = resolve("page", &loader, &HostConfig::new(), Hooks::default())
        .await
        .unwrap();
    assert_eq!(after, "HH");

    // Suffix still wins over the reconfigured default.
    let overridden = resolve(
        "page!inclusionLoader=view",
        &loader,
        &HostConfig::new(),
        Hooks::default(),
    )
    .await
    .unwrap();
    assert_eq!(overridden, "VV");

    let err = replace_default("strict", "yes".into()).unwrap_err();
    assert!(err.to_string().contains("strict"));

    replace_default("strict", true.into()).unwrap();
    let loader = MemoryLoader::new().with_text("text!broken.html", r#"<link rel="css""#);
    let err = resolve("broken", &loader, &HostConfig::new(), Hooks::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::UnterminatedTag { position: 0 }));

    reset_defaults();
    let loader = MemoryLoader::new().with_text("text!broken.html", r#"<link rel="css""#);
    let document = resolve("broken", &loader, &HostConfig::new(), Hooks::default())
        .await
        .unwrap();
    assert_eq!(document, r#"<link rel="css""#);
}
