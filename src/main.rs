//! Credit Scorer Core - Main Entry Point

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod api;
mod logic;
pub mod constants;

use api::commands;

// --- Window Control Commands (Manual Implementation) ---
#[tauri::command]
async fn window_minimize(window: tauri::Window) {
    let _ = window.minimize();
}

#[tauri::command]
async fn window_toggle_maximize(window: tauri::Window) {
    if let Ok(is_max) = window.is_maximized() {
        if is_max {
            let _ = window.unmaximize();
        } else {
            let _ = window.maximize();
        }
    }
}

#[tauri::command]
async fn window_close(window: tauri::Window) {
    let _ = window.close();
}

#[tauri::command]
async fn window_start_drag(window: tauri::Window) {
    let _ = window.start_dragging();
}

#[tauri::command]
async fn show_main_window(window: tauri::Window) {
    let _ = window.show();
    let _ = window.set_focus();
}
// -----------------------------------------------------

fn main() {
    #[cfg(debug_assertions)]
    {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();
    }

    log::info!("Starting {} v{}...", constants::APP_NAME, constants::APP_VERSION);

    // Artifacts load once; a failure halts scoring but the window still
    // opens so the frontend can show the condition
    match logic::artifacts::init() {
        Ok(()) => log::info!("Scoring engine ready"),
        Err(e) => log::error!("Scoring halted: {}", e),
    }

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .invoke_handler(tauri::generate_handler![
            // Window Controls (Manual)
            window_minimize,
            window_toggle_maximize,
            window_close,
            window_start_drag,
            show_main_window,

            // Status Commands
            commands::get_engine_status,
            commands::verify_model_checksum,

            // Form Commands
            commands::get_form_schema,
            commands::get_default_input,
            commands::preview_record,

            // Prediction Commands
            commands::predict_risk,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
