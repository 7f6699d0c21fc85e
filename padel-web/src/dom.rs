use js_sys::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response, Storage, Window};

/// # Errors
/// Fails off-browser, where there is no `window`.
pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("`window` unavailable"))
}

/// Best-effort text for a thrown JS value.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Resolve after `duration_ms` on the browser timer queue.
///
/// # Errors
/// Returns an error if the timer cannot be scheduled.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn sleep_ms(duration_ms: i32) -> Result<(), JsValue> {
    let win = window()?;
    let promise = Promise::new(&mut |resolve, reject| {
        if let Err(err) =
            win.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, duration_ms)
        {
            let _ = reject.call1(&JsValue::UNDEFINED, &err);
        }
    });
    JsFuture::from(promise).await.map(|_| ())
}

/// POST a JSON body and return the status code with the raw response text.
///
/// Non-2xx statuses are not errors here; callers decide what they mean.
///
/// # Errors
/// Returns an error if the request cannot be built or the network fails.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn post_json(
    url: &str,
    headers: &[(&str, String)],
    body: &str,
) -> Result<(u16, String), JsValue> {
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_mode(RequestMode::Cors);
    init.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &init)?;
    let request_headers = request.headers();
    request_headers.set("Content-Type", "application/json")?;
    for (name, value) in headers {
        request_headers.set(name, value)?;
    }

    let resp_value = JsFuture::from(window()?.fetch_with_request(&request)).await?;
    let response: Response = resp_value.dyn_into()?;
    let text = JsFuture::from(response.text()?)
        .await?
        .as_string()
        .unwrap_or_default();
    Ok((response.status(), text))
}

/// Access the browser `localStorage` handle.
///
/// # Errors
/// Returns an error if the window cannot be accessed or `localStorage` is disabled.
pub fn local_storage() -> Result<Storage, JsValue> {
    window()?
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("localStorage unavailable"))
}
