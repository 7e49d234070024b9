use chrono::NaiveDate;

use crate::{
    models::Device,
    navigation::Page,
    settings::AlertSettings,
    store::{Store, StoreSnapshot},
    AppContext,
};

fn store_from_context(context: &AppContext) -> Store {
    context.store.clone()
}

pub async fn get_snapshot(context: &AppContext) -> Result<StoreSnapshot, String> {
    let store = store_from_context(context);
    Ok(store.snapshot().await)
}

pub async fn navigate(context: &AppContext, page: Page) -> Result<StoreSnapshot, String> {
    let store = store_from_context(context);
    store.navigate(page).await.map_err(|e| e.to_string())?;
    Ok(store.snapshot().await)
}

pub async fn go_back(context: &AppContext) -> Result<StoreSnapshot, String> {
    let store = store_from_context(context);
    store.back().await.map_err(|e| e.to_string())?;
    Ok(store.snapshot().await)
}

pub async fn reset_app(context: &AppContext) -> Result<StoreSnapshot, String> {
    let store = store_from_context(context);
    store.reset().await.map_err(|e| e.to_string())?;
    Ok(store.snapshot().await)
}

pub async fn set_device_name(context: &AppContext, name: String) -> Result<StoreSnapshot, String> {
    let store = store_from_context(context);
    store.set_device_name(name).await.map_err(|e| e.to_string())?;
    Ok(store.snapshot().await)
}

/// Submits the device form. Uses `name` when given, otherwise the text
/// already typed into the form.
pub async fn add_device(
    context: &AppContext,
    name: Option<String>,
) -> Result<Option<Device>, String> {
    let store = store_from_context(context);
    let name = match name {
        Some(name) => name,
        None => store.state().await.device_name,
    };
    store.add_device(&name).await.map_err(|e| e.to_string())
}

pub async fn select_device(context: &AppContext, device_id: String) -> Result<StoreSnapshot, String> {
    let store = store_from_context(context);
    store
        .select_device(&device_id)
        .await
        .map_err(|e| e.to_string())?;
    Ok(store.snapshot().await)
}

pub async fn open_composting(context: &AppContext) -> Result<StoreSnapshot, String> {
    let store = store_from_context(context);
    store.open_composting().await.map_err(|e| e.to_string())?;
    Ok(store.snapshot().await)
}

pub async fn start_composting(context: &AppContext) -> Result<StoreSnapshot, String> {
    let store = store_from_context(context);
    store.start_composting().await.map_err(|e| e.to_string())?;
    Ok(store.snapshot().await)
}

pub async fn toggle_fill_demo(context: &AppContext) -> Result<StoreSnapshot, String> {
    let store = store_from_context(context);
    store.toggle_fill_demo().await.map_err(|e| e.to_string())?;
    Ok(store.snapshot().await)
}

pub async fn send_full_alert(context: &AppContext) -> Result<String, String> {
    let store = store_from_context(context);
    let alert = context.settings.alert();
    store
        .send_full_alert(&alert)
        .await
        .map_err(|e| e.to_string())
}

pub async fn open_calendar(context: &AppContext) -> Result<StoreSnapshot, String> {
    let store = store_from_context(context);
    store.open_calendar().await.map_err(|e| e.to_string())?;
    Ok(store.snapshot().await)
}

pub async fn close_calendar(context: &AppContext) -> Result<StoreSnapshot, String> {
    let store = store_from_context(context);
    store.close_calendar().await.map_err(|e| e.to_string())?;
    Ok(store.snapshot().await)
}

pub async fn select_date(context: &AppContext, date: NaiveDate) -> Result<StoreSnapshot, String> {
    let store = store_from_context(context);
    store.select_date(date).await.map_err(|e| e.to_string())?;
    Ok(store.snapshot().await)
}

pub async fn request_permissions(context: &AppContext) -> Result<bool, String> {
    let store = store_from_context(context);
    store
        .request_permissions(&context.position, &context.geocoder)
        .await
        .map_err(|e| e.to_string())
}

pub async fn refresh_location(context: &AppContext) -> Result<bool, String> {
    let store = store_from_context(context);
    store
        .refresh_location(&context.position, &context.geocoder)
        .await
        .map_err(|e| e.to_string())
}

pub async fn get_alert_settings(context: &AppContext) -> Result<AlertSettings, String> {
    Ok(context.settings.alert())
}

pub async fn set_alert_contact(context: &AppContext, contact: String) -> Result<AlertSettings, String> {
    let mut alert = context.settings.alert();
    alert.contact = contact;
    context
        .settings
        .update_alert(alert.clone())
        .map_err(|e| e.to_string())?;
    Ok(alert)
}
