use shared::presentation::ChartSpec;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use super::chart_handle::{ChartHandle, CANVAS_HEIGHT, CANVAS_WIDTH};

#[derive(Properties, PartialEq)]
pub struct ChartCanvasProps {
    pub spec: ChartSpec,
    #[prop_or_default]
    pub loading: bool,
}

/// Mount point for one chart. Owns at most one live `ChartHandle`.
pub struct ChartCanvas {
    canvas_ref: NodeRef,
    handle: Option<ChartHandle>,
}

impl ChartCanvas {
    fn redraw(&mut self, spec: &ChartSpec) {
        let canvas = self.canvas_ref.cast::<HtmlCanvasElement>();
        self.redraw_on(canvas, spec);
    }

    /// Destroy the live chart, then draw `spec` onto `canvas` if there is data
    fn redraw_on(&mut self, canvas: Option<HtmlCanvasElement>, spec: &ChartSpec) {
        if let Some(previous) = self.handle.take() {
            previous.destroy();
        }

        if !spec.has_data() {
            return;
        }

        let Some(canvas) = canvas else {
            return;
        };
        self.handle = ChartHandle::draw(canvas, spec);
    }
}

impl Component for ChartCanvas {
    type Message = ();
    type Properties = ChartCanvasProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
            handle: None,
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        ctx.props() != old_props
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        self.redraw(&ctx.props().spec);
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(handle) = self.handle.take() {
            handle.destroy();
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();

        html! {
            <div class="chart-container">
                <h3 class="chart-title">{&props.spec.title}</h3>
                {if props.spec.has_data() {
                    html! {
                        <div class="chart-content">
                            <canvas
                                ref={self.canvas_ref.clone()}
                                class="chart-canvas"
                                width={CANVAS_WIDTH.to_string()}
                                height={CANVAS_HEIGHT.to_string()}
                            ></canvas>
                        </div>
                    }
                } else if props.loading {
                    html! { <div class="chart-loading"><p>{"Loading chart data..."}</p></div> }
                } else {
                    html! { <div class="chart-empty"><p>{&props.spec.empty_message}</p></div> }
                }}
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::CategoryTotals;

    #[test]
    fn test_redraw_without_data_keeps_no_handle() {
        let mut chart = ChartCanvas {
            canvas_ref: NodeRef::default(),
            handle: None,
        };

        chart.redraw(&ChartSpec::expense_breakdown(&CategoryTotals::new()));
        assert!(chart.handle.is_none());
    }
}

#[cfg(test)]
mod wasm_tests {
    use super::*;
    use shared::{CategoryTotals, MonthKey, MonthlyBalance};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::CanvasRenderingContext2d;

    wasm_bindgen_test_configure!(run_in_browser);

    fn canvas() -> HtmlCanvasElement {
        web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.create_element("canvas").ok())
            .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
            .unwrap()
    }

    /// Alpha of the top-left pixel: 0 on a cleared canvas, 255 once a chart filled it
    fn corner_alpha(canvas: &HtmlCanvasElement) -> u8 {
        let context = canvas
            .get_context("2d")
            .unwrap()
            .unwrap()
            .dyn_into::<CanvasRenderingContext2d>()
            .unwrap();
        context.get_image_data(0.0, 0.0, 1.0, 1.0).unwrap().data().0[3]
    }

    fn chart() -> ChartCanvas {
        ChartCanvas {
            canvas_ref: NodeRef::default(),
            handle: None,
        }
    }

    fn expense_spec() -> ChartSpec {
        let mut totals = CategoryTotals::new();
        totals.insert("Food".to_string(), 80.0);
        totals.insert("Transport".to_string(), 20.0);
        ChartSpec::expense_breakdown(&totals)
    }

    #[wasm_bindgen_test]
    fn test_redraw_destroys_previous_chart() {
        let mut chart = chart();
        let first = canvas();
        let second = canvas();

        chart.redraw_on(Some(first.clone()), &expense_spec());
        assert!(chart.handle.is_some());
        assert_eq!(corner_alpha(&first), 255);

        let balance = vec![MonthlyBalance {
            month: MonthKey::new(2024, 1).unwrap(),
            net: 700.0,
        }];
        chart.redraw_on(Some(second.clone()), &ChartSpec::balance_evolution(&balance));
        assert!(chart.handle.is_some());
        assert_eq!(corner_alpha(&first), 0);
        assert_eq!(corner_alpha(&second), 255);
    }

    #[wasm_bindgen_test]
    fn test_redraw_with_empty_spec_clears_chart() {
        let mut chart = chart();
        let target = canvas();

        chart.redraw_on(Some(target.clone()), &expense_spec());
        chart.redraw_on(Some(target.clone()), &expense_spec());
        assert!(chart.handle.is_some());
        assert_eq!(corner_alpha(&target), 255);

        chart.redraw_on(Some(target.clone()), &ChartSpec::expense_breakdown(&CategoryTotals::new()));
        assert!(chart.handle.is_none());
        assert_eq!(corner_alpha(&target), 0);
    }
}
