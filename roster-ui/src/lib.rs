//! Thành phần giao diện danh sách bệnh nhân cho môi trường WebAssembly.

#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::styles;
    use roster_core::{
        build_patient_list, is_activation_key, ClientConfig, ClientConfigOverrides, DetailLine,
        EmergencyContact, FetchOutcome, PatientDetail, PatientListModel, PatientSummary,
        Selection, ViewState,
    };
    use roster_fhir::FhirClient;
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;
    use web_sys::{console, Document, Element, Window};
    use yew::platform::spawn_local;
    use yew::prelude::*;

    /// Trạng thái danh sách; chỉ nhận kết quả đầu tiên.
    #[derive(Default, PartialEq)]
    struct ListState(ViewState);

    impl Reducible for ListState {
        type Action = FetchOutcome;

        fn reduce(self: Rc<Self>, outcome: Self::Action) -> Rc<Self> {
            match self.0.completed(outcome) {
                Some(next) => Rc::new(ListState(next)),
                None => self,
            }
        }
    }

    #[derive(Properties, PartialEq)]
    pub struct PatientListViewProps {
        #[prop_or_default]
        pub config: ClientConfig,
    }

    #[function_component(PatientListView)]
    fn patient_list_view(props: &PatientListViewProps) -> Html {
        use_effect_with((), |_| {
            if let Some(window) = web_sys::window() {
                if let Some(document) = window.document() {
                    if let Err(err) = styles::ensure_styles(&document) {
                        console::error_1(&err);
                    }
                }
            }
            || ()
        });

        let list = use_reducer(ListState::default);
        let selection = use_state(Selection::default);

        {
            let list = list.clone();
            let config = props.config.clone();
            use_effect_with((), move |_| {
                let mounted = Rc::new(Cell::new(true));
                let task_mounted = Rc::clone(&mounted);

                spawn_local(async move {
                    let outcome = FhirClient::new(config).fetch_patients().await;
                    if let Err(err) = &outcome {
                        console::error_1(&JsValue::from_str(&format!(
                            "Error fetching patients: {err}"
                        )));
                    }
                    // Component đã bị gỡ: bỏ qua kết quả.
                    if task_mounted.get() {
                        list.dispatch(outcome);
                    }
                });

                move || mounted.set(false)
            });
        }

        let on_select = {
            let selection = selection.clone();
            Callback::from(move |id: String| {
                let mut next = (*selection).clone();
                if next.select(Some(&id)) {
                    selection.set(next);
                }
            })
        };

        let model = build_patient_list(&list.0, &selection);
        render_model(&model, &on_select)
    }

    fn render_model(model: &PatientListModel, on_select: &Callback<String>) -> Html {
        match model {
            PatientListModel::Loading { label } => html! {
                <div class="roster-root">
                    <div class="roster-loading" role="status" aria-live="polite">{ *label }</div>
                </div>
            },
            PatientListModel::Error { message } => html! {
                <div class="roster-root">
                    <h1 class="roster-error" role="alert">{ message.clone() }</h1>
                </div>
            },
            PatientListModel::List { heading, items } => html! {
                <div class="roster-root">
                    <h1 class="roster-heading">{ *heading }</h1>
                    { for items.iter().map(|item| render_summary(item, on_select)) }
                </div>
            },
        }
    }

    fn render_summary(summary: &PatientSummary, on_select: &Callback<String>) -> Html {
        let target = summary.id.clone().filter(|_| summary.selectable);

        let onclick = target.clone().map(|id| {
            let on_select = on_select.clone();
            Callback::from(move |_: MouseEvent| on_select.emit(id.clone()))
        });

        let onkeydown = target.map(|id| {
            let on_select = on_select.clone();
            Callback::from(move |event: KeyboardEvent| {
                if is_activation_key(&event.key()) {
                    event.prevent_default();
                    on_select.emit(id.clone());
                }
            })
        });

        let expanded = summary.is_expanded();

        html! {
            <div
                class={classes!("patient-card", expanded.then_some("is-expanded"))}
                role="button"
                tabindex="0"
                aria-expanded={expanded.to_string()}
                aria-disabled={(!summary.selectable).then_some("true")}
                onclick={onclick}
                onkeydown={onkeydown}
            >
                <p class="patient-line">
                    <strong>{"ID:"}</strong>{" "}{ summary.id.clone().unwrap_or_default() }
                </p>
                <p class="patient-line">
                    <strong>{"Name:"}</strong>{" "}{ summary.name.clone() }
                </p>
                { summary.detail.as_ref().map(render_detail).unwrap_or_default() }
            </div>
        }
    }

    fn render_detail(detail: &PatientDetail) -> Html {
        html! {
            <div class="patient-detail">
                { for detail.lines.iter().map(render_line) }
                { detail.emergency_contact.as_ref().map(render_contact).unwrap_or_default() }
            </div>
        }
    }

    fn render_line(line: &DetailLine) -> Html {
        html! {
            <p class="patient-line">
                <strong>{ format!("{}:", line.label) }</strong>{" "}{ line.value.clone() }
            </p>
        }
    }

    fn render_contact(contact: &EmergencyContact) -> Html {
        html! {
            <div class="patient-contact">
                <strong>{"Emergency Contact:"}</strong>
                { for contact.lines.iter().map(|line| html! { <p>{ line.to_string() }</p> }) }
            </div>
        }
    }

    #[wasm_bindgen]
    pub fn mount_patient_list(selector: &str, config: Option<JsValue>) -> Result<(), JsValue> {
        let window: Window =
            web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Selector lỗi: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("Không tìm thấy element theo selector"))?;

        let config = match config {
            Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
                let overrides: ClientConfigOverrides = from_value(js_cfg)
                    .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
                ClientConfig::from(overrides)
            }
            _ => ClientConfig::default(),
        };

        yew::Renderer::<PatientListView>::with_root_and_props(
            target,
            PatientListViewProps { config },
        )
        .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_patient_list;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_patient_list(
    _: &str,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "roster-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}
