#![allow(warnings)]
//! ShopDesk Frontend Entry Point

mod models;
mod commands;
mod context;
mod store;
mod hooks;
mod storage;
mod download;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
