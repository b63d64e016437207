// Browser launching, with best-effort private/incognito mode
use crate::error::{ConsoleError, Result};
use std::path::Path;
use std::process::Command;

/// Open a URL in the user's browser
///
/// With `incognito` set, known browsers are tried with their private-mode
/// launch arguments first. Browsers without private-mode support, or
/// launchers that fail to spawn, fall back silently to a normal open.
pub fn open_url(url: &str, incognito: bool) -> Result<()> {
    if incognito {
        if try_private_window(url) {
            return Ok(());
        }
        tracing::debug!("No private-mode capable browser available, opening normally");
    }

    webbrowser::open(url).map_err(|e| ConsoleError::BrowserLaunchFailed(format!("{}", e)))?;

    Ok(())
}

/// Private-mode argument for a browser command, if it supports one
///
/// Only Chrome/Chromium and Firefox families accept a private-mode flag on
/// the command line.
fn private_mode_flag(browser: &str) -> Option<&'static str> {
    let name = Path::new(browser)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(browser);

    match name {
        "google-chrome" | "google-chrome-stable" | "chrome" | "chromium" | "chromium-browser" => {
            Some("--incognito")
        }
        "firefox" | "firefox-esr" => Some("--private-window"),
        _ => None,
    }
}

/// Browser commands to try for a private window, most preferred first
///
/// A user-chosen `$BROWSER` is honored exclusively: if it cannot open a
/// private window, the fallback is a normal open of that same browser, not
/// a private window in some other one.
fn candidate_browsers() -> Vec<String> {
    if let Ok(browser) = std::env::var("BROWSER") {
        if !browser.is_empty() {
            return vec![browser];
        }
    }

    ["google-chrome", "chromium", "chromium-browser", "firefox"]
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn try_private_window(url: &str) -> bool {
    for browser in candidate_browsers() {
        let Some(flag) = private_mode_flag(&browser) else {
            continue;
        };

        match Command::new(&browser).arg(flag).arg(url).spawn() {
            Ok(_) => {
                tracing::debug!("Opened {} in private mode", browser);
                return true;
            }
            Err(e) => {
                tracing::debug!("Failed to launch {}: {}", browser, e);
            }
        }
    }

    false
}
