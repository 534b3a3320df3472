//! Sidebar component with collapsible menu items

use super::menu::NavItem;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Sub-menu entry; sub-menus are one level deep
#[component]
fn SidebarLeaf(item: NavItem, is_active: bool) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let path = item.path.clone();

    view! {
        <div
            class="app-sidebar__item"
            class:app-sidebar__item--active=is_active
            style:padding-left="22px"
            on:click=move |_| ctx.navigate(&path)
        >
            <div class="app-sidebar__item-content">
                {icon(item.icon)}
                <span>{item.label.clone()}</span>
            </div>
        </div>
    }
}

#[component]
fn SidebarItem(item: NavItem, active: Option<String>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let is_active = active.as_deref() == Some(item.key.as_str());
    let has_children = !item.children.is_empty();
    let contains_active = item
        .children
        .iter()
        .any(|child| active.as_deref() == Some(child.key.as_str()));
    let expanded = RwSignal::new(contains_active);

    let path = item.path.clone();
    let children = StoredValue::new(item.children.clone());
    let active_for_children = StoredValue::new(active.clone());

    view! {
        <div>
            <div
                class="app-sidebar__item"
                class:app-sidebar__item--active=is_active
                style:padding-left="12px"
                on:click=move |_| {
                    if has_children {
                        expanded.update(|open| *open = !*open);
                    } else {
                        ctx.navigate(&path);
                    }
                }
            >
                <div class="app-sidebar__item-content">
                    {icon(item.icon)}
                    <span>{item.label.clone()}</span>
                </div>
                {has_children.then(|| view! {
                    <div
                        class="app-sidebar__chevron"
                        class:app-sidebar__chevron--expanded=move || expanded.get()
                    >
                        {icon("chevron-right")}
                    </div>
                })}
            </div>

            {has_children.then(|| view! {
                <Show when=move || expanded.get()>
                    <div class="app-sidebar__children">
                        {children.get_value().into_iter().map(|child| {
                            let is_active = active_for_children
                                .with_value(|active| active.as_deref() == Some(child.key.as_str()));
                            view! { <SidebarLeaf item=child is_active=is_active /> }
                        }).collect_view()}
                    </div>
                </Show>
            })}
        </div>
    }
}

#[component]
pub fn Sidebar(nav: Vec<NavItem>, active: Option<String>) -> impl IntoView {
    if nav.is_empty() {
        return view! {
            <div class="app-sidebar__content app-sidebar__content--loading">"Loading menu…"</div>
        }
        .into_any();
    }

    view! {
        <div class="app-sidebar__content">
            {nav.into_iter().map(|item| {
                view! { <SidebarItem item=item active=active.clone() /> }
            }).collect_view()}
        </div>
    }
    .into_any()
}
