// Plain DOM view. Elements are created once in `mount` and updated from the
// session on every `render`; no state lives here.
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement};

use super::controller::{GamePhase, GameSession};
use super::round::OPTION_COUNT;

const CARD_BASE_STYLE: &str = "width:220px; height:240px; margin:12px; border-radius:28px; border:6px solid #e5e7eb; background:#fff; display:flex; flex-direction:column; align-items:center; justify-content:center; cursor:pointer; font-family:'Nunito', sans-serif; box-shadow:0 8px 0 rgba(0,0,0,0.08); transition:transform 0.15s;";
const CARD_SELECTED: &str = "border-color:#3b82f6; transform:scale(1.05);";
const CARD_ERROR: &str = "border-color:#ef4444; background:#fee2e2; transform:translateX(-4px);";
const CARD_SUCCESS: &str = "border-color:#22c55e; background:#dcfce7; transform:scale(1.1);";
const CARD_DISABLED: &str = "cursor:default; opacity:0.85;";

pub struct CardView {
    pub button: HtmlButtonElement,
    emoji: Element,
    word: Element,
}

pub struct View {
    intro: HtmlElement,
    pub start_button: HtmlElement,
    stage: HtmlElement,
    header: HtmlElement,
    letter: Element,
    loader: HtmlElement,
    pub cards: Vec<CardView>,
    confetti: HtmlElement,
}

fn styled<T: JsCast>(doc: &Document, tag: &str, id: &str, style: &str) -> Result<T, JsValue> {
    let el = doc.create_element(tag)?;
    if !id.is_empty() {
        el.set_id(id);
    }
    el.set_attribute("style", style)?;
    el.dyn_into::<T>()
        .map_err(|_| JsValue::from_str("unexpected element type"))
}

fn show(el: &HtmlElement, visible: bool, display: &str) {
    let _ = el
        .style()
        .set_property("display", if visible { display } else { "none" });
}

impl View {
    /// Build the page (replacing a previous mount if present).
    pub fn mount(doc: &Document) -> Result<Self, JsValue> {
        let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
        if let Some(old) = doc.get_element_by_id("lp-root") {
            old.remove();
        }
        let root: HtmlElement = styled(
            doc,
            "div",
            "lp-root",
            "position:fixed; inset:0; background:#F0F9FF; overflow:hidden; font-family:'Nunito', sans-serif;",
        )?;
        body.append_child(&root)?;

        // Intro overlay
        let intro: HtmlElement = styled(
            doc,
            "div",
            "lp-intro",
            "position:absolute; inset:0; display:flex; flex-direction:column; align-items:center; justify-content:center; gap:24px; z-index:40;",
        )?;
        let title: HtmlElement = styled(doc, "h1", "", "font-size:64px; color:#3b82f6; margin:0;")?;
        title.set_text_content(Some("Letter Pop 🎈"));
        let start_button: HtmlElement = styled(
            doc,
            "button",
            "lp-start",
            "font-size:40px; padding:20px 56px; border:none; border-radius:999px; background:#22c55e; color:#fff; cursor:pointer; box-shadow:0 8px 0 #15803d;",
        )?;
        start_button.set_text_content(Some("▶ Play"));
        intro.append_child(&title)?;
        intro.append_child(&start_button)?;
        root.append_child(&intro)?;

        // Game stage
        let stage: HtmlElement = styled(
            doc,
            "div",
            "lp-stage",
            "position:absolute; inset:0; display:none; flex-direction:column; align-items:center;",
        )?;
        let hint: HtmlElement = styled(
            doc,
            "div",
            "",
            "position:absolute; top:16px; right:16px; color:#9ca3af; font-size:14px;",
        )?;
        hint.set_text_content(Some("Press Space to Skip"));
        stage.append_child(&hint)?;

        let header: HtmlElement = styled(doc, "header", "lp-header", "text-align:center; padding-top:32px;")?;
        let prompt: HtmlElement = styled(doc, "h2", "", "font-size:30px; color:#6b7280; margin:0 0 8px 0;")?;
        prompt.set_text_content(Some("Find the word starting with:"));
        let letter = doc.create_element("div")?;
        letter.set_id("lp-letter");
        letter.set_attribute(
            "style",
            "font-size:12rem; line-height:1; font-weight:bold; color:#3b82f6; user-select:none;",
        )?;
        header.append_child(&prompt)?;
        header.append_child(&letter)?;
        stage.append_child(&header)?;

        let loader: HtmlElement = styled(
            doc,
            "div",
            "lp-loader",
            "display:none; font-size:80px; color:#60a5fa; padding-top:96px;",
        )?;
        loader.set_text_content(Some("⏳"));
        stage.append_child(&loader)?;

        let row: HtmlElement = styled(
            doc,
            "main",
            "lp-cards",
            "display:flex; flex-wrap:wrap; justify-content:center; align-items:center; padding:24px;",
        )?;
        let mut cards = Vec::with_capacity(OPTION_COUNT);
        for i in 0..OPTION_COUNT {
            let button: HtmlButtonElement =
                styled(doc, "button", &format!("lp-card-{i}"), CARD_BASE_STYLE)?;
            let emoji = doc.create_element("div")?;
            emoji.set_attribute("style", "font-size:96px; line-height:1.1;")?;
            let word = doc.create_element("div")?;
            word.set_attribute("style", "font-size:28px; color:#374151; margin-top:8px;")?;
            button.append_child(&emoji)?;
            button.append_child(&word)?;
            row.append_child(&button)?;
            cards.push(CardView {
                button,
                emoji,
                word,
            });
        }
        stage.append_child(&row)?;

        let footer: HtmlElement = styled(doc, "footer", "", "color:#9ca3af; font-size:14px; padding:16px;")?;
        footer.set_text_content(Some("Tap the picture that starts with the letter!"));
        stage.append_child(&footer)?;
        root.append_child(&stage)?;

        let confetti: HtmlElement = styled(
            doc,
            "div",
            "lp-confetti",
            "position:absolute; inset:0; display:none; pointer-events:none; font-size:56px; text-align:center; padding-top:12px; z-index:50;",
        )?;
        confetti.set_text_content(Some("🎉 ✨ 🎊 ⭐ 🎉 ✨ 🎊 ⭐"));
        root.append_child(&confetti)?;

        Ok(Self {
            intro,
            start_button,
            stage,
            header,
            letter,
            loader,
            cards,
            confetti,
        })
    }

    pub fn render(&self, s: &GameSession) {
        let in_intro = s.phase == GamePhase::Intro;
        show(&self.intro, in_intro, "flex");
        show(&self.stage, !in_intro, "flex");
        if in_intro {
            return;
        }

        let loading = s.phase == GamePhase::Loading;
        show(&self.loader, loading, "block");
        show(&self.header, !loading, "block");
        show(&self.confetti, s.celebrating, "block");

        let letter = s.round.as_ref().map(|r| r.letter.to_string());
        self.letter.set_text_content(letter.as_deref());

        for (i, card) in self.cards.iter().enumerate() {
            let Some(option) = s.round.as_ref().map(|r| &r.options[i]) else {
                let _ = card.button.set_attribute("style", &format!("{CARD_BASE_STYLE} display:none;"));
                continue;
            };
            card.emoji.set_text_content(Some(&option.emoji));
            card.word.set_text_content(Some(&option.word));

            let mut style = String::from(CARD_BASE_STYLE);
            if s.errored == Some(i) {
                style.push_str(CARD_ERROR);
            } else if s.chosen == Some(i) {
                style.push_str(CARD_SUCCESS);
            } else if s.keyboard_mode && s.selected == i {
                style.push_str(CARD_SELECTED);
            }
            let playable = s.phase == GamePhase::Playing;
            if !playable {
                style.push_str(CARD_DISABLED);
            }
            let _ = card.button.set_attribute("style", &style);
            card.button.set_disabled(!playable);
        }
    }
}
