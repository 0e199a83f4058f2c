use desktop_runtime::{DesktopHostContext, DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="SelfOS" />
        <Meta name="description" content="A desktop environment in a browser tab." />

        <main class="site-root">
            <DesktopEntry />
        </main>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    let host = DesktopHostContext::default();
    logging::log!("desktop host: {}", host.host_strategy_name());

    view! {
        <DesktopProvider host=host>
            <DesktopShell />
        </DesktopProvider>
    }
}
