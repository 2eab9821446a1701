use std::env;
use std::path::PathBuf;

use serial_test::serial;

use super::{get_data_dir, get_db_path};

#[test]
#[serial]
fn data_dir_uses_xdg_data_home() {
    let previous = env::var_os("XDG_DATA_HOME");
    unsafe {
        env::set_var("XDG_DATA_HOME", "/tmp/xdg-itinerary-test");
    }

    assert_eq!(
        get_data_dir(),
        PathBuf::from("/tmp/xdg-itinerary-test/itinerary")
    );
    assert_eq!(
        get_db_path(),
        PathBuf::from("/tmp/xdg-itinerary-test/itinerary/itinerary.db")
    );

    unsafe {
        match previous {
            Some(v) => env::set_var("XDG_DATA_HOME", v),
            None => env::remove_var("XDG_DATA_HOME"),
        }
    }
}

#[test]
#[serial]
fn data_dir_falls_back_to_home() {
    let previous_xdg = env::var_os("XDG_DATA_HOME");
    let previous_home = env::var_os("HOME");
    unsafe {
        env::remove_var("XDG_DATA_HOME");
        env::set_var("HOME", "/tmp/home-itinerary-test");
    }

    assert_eq!(
        get_data_dir(),
        PathBuf::from("/tmp/home-itinerary-test/.local/share/itinerary")
    );

    unsafe {
        if let Some(v) = previous_xdg {
            env::set_var("XDG_DATA_HOME", v);
        }
        match previous_home {
            Some(v) => env::set_var("HOME", v),
            None => env::remove_var("HOME"),
        }
    }
}

#[test]
#[serial]
fn db_path_ends_with_file_name() {
    assert!(get_db_path().ends_with("itinerary/itinerary.db"));
}
