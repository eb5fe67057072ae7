use hyper_staticmount::{ConfigError, Main, PathPolicy, Settings, StaticOptions};
use std::net::SocketAddr;
use std::path::Path;
use tempdir::TempDir;

#[test]
fn test_options_default_to_static_directory() {
    let config = StaticOptions::new("/srv/site").build().unwrap();
    assert_eq!(config.url_prefix, "/static/");
    assert_eq!(config.root_directory, Path::new("/srv/site/static"));
    assert_eq!(config.default_encoding, "utf-8");
    assert_eq!(config.path_policy, PathPolicy::Normalize);
}

#[test]
fn test_options_overrides() {
    let mut options = StaticOptions::new("/srv/site");
    options
        .url("/assets/")
        .directory("public")
        .encoding("latin-1")
        .path_policy(PathPolicy::Raw);
    let config = options.build().unwrap();
    assert_eq!(config.url_prefix, "/assets/");
    assert_eq!(config.root_directory, Path::new("/srv/site/public"));
    assert_eq!(config.default_encoding, "latin-1");
    assert_eq!(config.path_policy, PathPolicy::Raw);
}

#[test]
fn test_absolute_directory_ignores_base() {
    let mut options = StaticOptions::new("/srv/site");
    options.directory("/var/www");
    let config = options.build().unwrap();
    assert_eq!(config.root_directory, Path::new("/var/www"));
}

#[test]
fn test_relative_base_becomes_absolute() {
    let config = StaticOptions::default().build().unwrap();
    assert!(config.root_directory.is_absolute());
    assert!(config.root_directory.ends_with("static"));
}

#[test]
fn test_malformed_prefix_fails_fast() {
    let dir = TempDir::new("hyper-staticmount-tests").unwrap();
    for url in ["static/", "/static", ""] {
        let mut options = StaticOptions::new(dir.path());
        options.url(url);
        assert!(matches!(
            Main::new(&options),
            Err(ConfigError::InvalidUrlPrefix(_))
        ));
    }
}

#[test]
fn test_malformed_prefix_fails_even_without_directory() {
    let mut options = StaticOptions::new("/nonexistent/base");
    options.url("nope");
    assert!(Main::new(&options).is_err());
}

#[test]
fn test_missing_directory_is_not_fatal() {
    let main = Main::new(&StaticOptions::new("/nonexistent/base")).unwrap();
    assert!(!main.resolver().is_enabled());
    assert!(main.resolver().config().is_none());
}

#[test]
fn test_settings_from_toml() {
    let settings = Settings::from_toml(
        r#"
        [server]
        listen = "0.0.0.0:3000"

        [static]
        base_dir = "/srv/site"
        url = "/assets/"
        encoding = "utf-16"
        path_policy = "raw"
        "#,
    )
    .unwrap();

    assert_eq!(
        settings.server.listen,
        "0.0.0.0:3000".parse::<SocketAddr>().unwrap()
    );
    assert_eq!(settings.static_files.base_dir, Path::new("/srv/site"));
    assert_eq!(settings.static_files.url.as_deref(), Some("/assets/"));
    assert_eq!(settings.static_files.directory, None);
    assert_eq!(settings.static_files.encoding.as_deref(), Some("utf-16"));
    assert_eq!(settings.static_files.path_policy, PathPolicy::Raw);
}

#[test]
fn test_settings_defaults() {
    let settings = Settings::from_toml("").unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(
        settings.server.listen,
        "127.0.0.1:8000".parse::<SocketAddr>().unwrap()
    );
}

#[test]
fn test_settings_reject_unknown_keys() {
    let result = Settings::from_toml("[static]\nprefix = \"/s/\"\n");
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_settings_load_from_file() {
    let dir = TempDir::new("hyper-staticmount-tests").unwrap();
    let path = dir.path().join("staticmount.toml");
    std::fs::write(&path, "[static]\ndirectory = \"public\"\n").unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(
        settings.static_files.directory.as_deref(),
        Some(Path::new("public"))
    );

    let missing = Settings::load(dir.path().join("missing.toml"));
    assert!(matches!(missing, Err(ConfigError::Io(_))));
}
