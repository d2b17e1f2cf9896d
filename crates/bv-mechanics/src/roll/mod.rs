//! Contextual roll resolution.
//!
//! A [`RollTrigger`] says what the user clicked. The [`RollResolver`]
//! decides whether the user must pick something first (which ability backs
//! a skill, whether Strength adds to damage, which check type an ability
//! roll is), builds the final [`Formula`], rolls it through a
//! [`DiceEngine`], and publishes the narrated result to a [`ChatSink`].

pub mod engine;
pub mod host;
pub mod method;
pub mod sink;
pub mod trigger;

pub use engine::{DiceEngine, Evaluation, SeededEngine};
pub use host::{ChoiceHost, ChoiceOption, ChoicePrompt, ScriptedHost};
pub use method::VoidMethod;
pub use sink::{ChatLog, ChatMessage, ChatSink, RollOutcome};
pub use trigger::{Action, RollTrigger};

use crate::config::RollConfig;
use crate::dice::Formula;
use crate::error::MechResult;
use crate::sheet::{AbilityCode, CharacterSheet};

/// What happened to a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A message was published.
    Published,
    /// The user closed a prompt without choosing; nothing was published.
    Dismissed,
    /// The trigger named a method with no roll rules; nothing was published.
    Skipped,
}

/// The check types offered for a raw ability roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckMode {
    Basic,
    UntrainedSkill,
    Initiative,
    UntrainedAttack,
}

impl CheckMode {
    fn key(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::UntrainedSkill => "untrained",
            Self::Initiative => "initiative",
            Self::UntrainedAttack => "untrained-attack",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic Ability Check",
            Self::UntrainedSkill => "Untrained Skill Check",
            Self::Initiative => "Initiative Roll",
            Self::UntrainedAttack => "Untrained Attack Roll",
        }
    }

    /// Agility doubles as the initiative and unarmed attack ability.
    fn offered_for(ability: AbilityCode) -> &'static [Self] {
        if ability == AbilityCode::Agi {
            &[
                Self::Basic,
                Self::UntrainedSkill,
                Self::Initiative,
                Self::UntrainedAttack,
            ]
        } else {
            &[Self::Basic, Self::UntrainedSkill]
        }
    }

    fn flavor(self, ability: AbilityCode) -> String {
        match self {
            Self::Basic => format!("Basic {} Check", ability.name()),
            Self::UntrainedSkill => format!("Untrained {} Check", ability.name()),
            Self::Initiative => "Initiative Roll".to_string(),
            Self::UntrainedAttack => "Untrained Attack Roll".to_string(),
        }
    }
}

/// Resolves roll triggers against a character sheet.
#[derive(Debug, Clone)]
pub struct RollResolver<E = SeededEngine> {
    engine: E,
    config: RollConfig,
}

impl RollResolver<SeededEngine> {
    /// Create a resolver with a seeded engine.
    pub fn new(config: RollConfig) -> Self {
        Self {
            engine: SeededEngine::from_config(&config),
            config,
        }
    }
}

impl<E: DiceEngine> RollResolver<E> {
    /// Create a resolver around a custom dice engine.
    pub fn with_engine(engine: E, config: RollConfig) -> Self {
        Self { engine, config }
    }

    /// The dice engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The active configuration.
    pub fn config(&self) -> &RollConfig {
        &self.config
    }

    /// Resolve one trigger.
    ///
    /// Prompts the host where the action needs a decision, then publishes
    /// at most one message to the sink. Errors come from malformed formulas
    /// only; a dismissed prompt or an unknown method is not an error.
    pub fn resolve<H, S>(
        &mut self,
        trigger: &RollTrigger,
        sheet: &CharacterSheet,
        host: &mut H,
        sink: &mut S,
    ) -> MechResult<Resolution>
    where
        H: ChoiceHost + ?Sized,
        S: ChatSink + ?Sized,
    {
        tracing::debug!(
            category = trigger.action.category(),
            formula = %trigger.formula,
            character = %sheet.name,
            "resolving roll trigger"
        );

        match &trigger.action {
            Action::Skill { name } => {
                let base = base_formula(trigger, sheet)?;
                let prompt = skill_prompt();
                let Some(ability) = ask(host, &prompt).and_then(|k| AbilityCode::from_code(&k))
                else {
                    return Ok(Resolution::Dismissed);
                };
                let formula = base.with_modifier(sheet.abilities.modifier(ability));
                self.roll(formula, format!("{name} ({}) Check", ability.name()), sink)
            }
            Action::Attack { name } => {
                let formula = base_formula(trigger, sheet)?;
                self.roll(formula, format!("{name} Attack"), sink)
            }
            Action::Damage { name } => {
                let base = base_formula(trigger, sheet)?;
                let prompt = ChoicePrompt::new("Roll", "Add your Strength modifier?")
                    .with_option("yes", "Yes")
                    .with_option("no", "No");
                let formula = match ask(host, &prompt).as_deref() {
                    Some("yes") => base.with_modifier(sheet.abilities.modifier(AbilityCode::Str)),
                    Some(_) => base,
                    None => return Ok(Resolution::Dismissed),
                };
                self.roll(formula, format!("{name} Damage"), sink)
            }
            Action::Method { display_name } => {
                self.resolve_method(trigger, display_name, sheet, host, sink)
            }
            Action::Phenomenon { name, table } => {
                sink.publish(ChatMessage::Announcement {
                    flavor: name.clone(),
                    content: table.clone(),
                });
                Ok(Resolution::Published)
            }
            Action::Ability(ability) => self.resolve_ability(trigger, *ability, sheet, host, sink),
        }
    }

    fn resolve_method<H, S>(
        &mut self,
        trigger: &RollTrigger,
        display_name: &str,
        sheet: &CharacterSheet,
        host: &mut H,
        sink: &mut S,
    ) -> MechResult<Resolution>
    where
        H: ChoiceHost + ?Sized,
        S: ChatSink + ?Sized,
    {
        let name = method::method_name(display_name);
        let Some((name, method)) = name.and_then(|n| VoidMethod::from_name(n).map(|m| (n, m)))
        else {
            tracing::warn!(method = display_name, "couldn't recognise method");
            return Ok(Resolution::Skipped);
        };

        let flavor = format!("Using {name} Method");
        let abilities = &sheet.abilities;
        let base = base_formula(trigger, sheet)?;

        let formula = match method {
            VoidMethod::SacrificialDivination => {
                let prompt =
                    ChoicePrompt::new("Sacrificial Divination", "Which trait should be used?")
                        .with_option(AbilityCode::Awa.code(), AbilityCode::Awa.name())
                        .with_option(AbilityCode::Int.code(), AbilityCode::Int.name());
                // The roll goes ahead when the prompt closes, picked or not.
                match ask(host, &prompt).and_then(|k| AbilityCode::from_code(&k)) {
                    Some(ability) => base.with_modifier(abilities.modifier(ability)),
                    None => base,
                }
            }
            VoidMethod::Furore => base.with_modifier(abilities.modifier(AbilityCode::Wil)),
            VoidMethod::Bloodletting | VoidMethod::Gnostic => {
                base.with_modifier(abilities.modifier(AbilityCode::Int))
            }
        };

        self.roll(formula, flavor, sink)
    }

    fn resolve_ability<H, S>(
        &mut self,
        trigger: &RollTrigger,
        ability: AbilityCode,
        sheet: &CharacterSheet,
        host: &mut H,
        sink: &mut S,
    ) -> MechResult<Resolution>
    where
        H: ChoiceHost + ?Sized,
        S: ChatSink + ?Sized,
    {
        let base = base_formula(trigger, sheet)?;
        let modes = CheckMode::offered_for(ability);
        let prompt = modes
            .iter()
            .fold(ChoicePrompt::new("Roll", "What type of check?"), |p, m| {
                p.with_option(m.key(), m.label())
            })
            .with_default(CheckMode::Basic.key());

        let Some(mode) = ask(host, &prompt)
            .and_then(|k| modes.iter().copied().find(|m| m.key() == k))
        else {
            return Ok(Resolution::Dismissed);
        };

        let formula = match mode {
            CheckMode::Basic => base,
            CheckMode::UntrainedSkill => base.untrained(self.config.untrained_penalty)?,
            CheckMode::Initiative | CheckMode::UntrainedAttack => base.strip_trailing_modifier()?,
        };

        self.roll(formula, mode.flavor(ability), sink)
    }

    fn roll<S>(&mut self, formula: Formula, flavor: String, sink: &mut S) -> MechResult<Resolution>
    where
        S: ChatSink + ?Sized,
    {
        let evaluation = self.engine.evaluate(&formula)?;
        tracing::debug!(%formula, total = evaluation.total, %flavor, "rolled");

        sink.publish(ChatMessage::Roll(RollOutcome {
            flavor,
            formula: formula.to_string(),
            total: evaluation.total,
            dice: evaluation.dice,
        }));
        Ok(Resolution::Published)
    }
}

fn skill_prompt() -> ChoicePrompt {
    AbilityCode::ALL.iter().fold(
        ChoicePrompt::new("Roll", "What trait should be used for the roll?"),
        |p, a| p.with_option(a.code(), a.name()),
    )
}

/// Parse the trigger's formula and substitute ability references.
fn base_formula(trigger: &RollTrigger, sheet: &CharacterSheet) -> MechResult<Formula> {
    Formula::parse(&trigger.formula)?.resolve_refs(&sheet.abilities)
}

/// Ask the host, accepting only keys the prompt actually offered.
fn ask<H: ChoiceHost + ?Sized>(host: &mut H, prompt: &ChoicePrompt) -> Option<String> {
    match host.choose(prompt) {
        Some(key) if prompt.option(&key).is_some() => Some(key),
        Some(key) => {
            tracing::warn!(key = %key, title = %prompt.title, "ignoring unknown choice");
            None
        }
        None => {
            tracing::debug!(title = %prompt.title, "prompt dismissed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::RollResult;
    use crate::error::MechError;

    /// Always totals 10 and remembers what it was asked to roll.
    #[derive(Default)]
    struct RecordingEngine {
        formulas: Vec<String>,
    }

    impl DiceEngine for RecordingEngine {
        fn evaluate(&mut self, formula: &Formula) -> MechResult<Evaluation> {
            self.formulas.push(formula.to_string());
            Ok(Evaluation {
                dice: RollResult::default(),
                total: 10,
            })
        }
    }

    fn resolver() -> RollResolver<RecordingEngine> {
        RollResolver::with_engine(RecordingEngine::default(), RollConfig::default())
    }

    fn sheet() -> CharacterSheet {
        CharacterSheet::new("Ysolde")
            .with_ability(AbilityCode::Agi, 3, -1)
            .with_ability(AbilityCode::Awa, 4, 2)
            .with_ability(AbilityCode::Str, 5, 3)
            .with_ability(AbilityCode::Wil, 4, 2)
            .with_ability(AbilityCode::Int, 2, -2)
    }

    fn run(
        label: &str,
        formula: &str,
        host: &mut ScriptedHost,
    ) -> (MechResult<Resolution>, ChatLog, RecordingEngine) {
        let trigger = RollTrigger::from_label(label, formula, None).unwrap();
        let mut resolver = resolver();
        let mut log = ChatLog::new();
        let result = resolver.resolve(&trigger, &sheet(), host, &mut log);
        (result, log, resolver.engine)
    }

    fn only_roll(log: &ChatLog) -> &RollOutcome {
        assert_eq!(log.len(), 1);
        log.messages()[0].as_roll().unwrap()
    }

    #[test]
    fn skill_appends_chosen_ability() {
        let mut host = ScriptedHost::new().answer("awa");
        let (result, log, _) = run("SKILL_Stealth", "1d20+4", &mut host);
        assert_eq!(result.unwrap(), Resolution::Published);

        let roll = only_roll(&log);
        assert_eq!(roll.formula, "1d20+4+2");
        assert_eq!(roll.flavor, "Stealth (Awareness) Check");
        assert_eq!(roll.total, 10);

        let prompt = &host.prompts()[0];
        assert_eq!(prompt.options.len(), 8);
        assert_eq!(prompt.options[7].label, "Intellect");
    }

    #[test]
    fn skill_negative_modifier_joins_without_plus() {
        let mut host = ScriptedHost::new().answer("agi");
        let (_, log, _) = run("SKILL_Stealth", "1d20+4", &mut host);
        let roll = only_roll(&log);
        assert_eq!(roll.formula, "1d20+4-1");
        assert_eq!(roll.flavor, "Stealth (Agility) Check");
    }

    #[test]
    fn skill_dismissed_publishes_nothing() {
        let mut host = ScriptedHost::new().dismiss();
        let (result, log, engine) = run("SKILL_Stealth", "1d20+4", &mut host);
        assert_eq!(result.unwrap(), Resolution::Dismissed);
        assert!(log.is_empty());
        assert!(engine.formulas.is_empty());
    }

    #[test]
    fn unknown_choice_counts_as_dismissed() {
        let mut host = ScriptedHost::new().answer("luck");
        let (result, log, _) = run("SKILL_Stealth", "1d20+4", &mut host);
        assert_eq!(result.unwrap(), Resolution::Dismissed);
        assert!(log.is_empty());
    }

    #[test]
    fn attack_rolls_as_is() {
        let mut host = ScriptedHost::new();
        let (_, log, _) = run("ATTACK_Sabre", "1d20+5", &mut host);
        let roll = only_roll(&log);
        assert_eq!(roll.formula, "1d20+5");
        assert_eq!(roll.flavor, "Sabre Attack");
        assert!(host.prompts().is_empty());
    }

    #[test]
    fn damage_with_and_without_strength() {
        let mut host = ScriptedHost::new().answer("yes");
        let (_, log, _) = run("DAMAGE_Sabre", "1d8+1", &mut host);
        let roll = only_roll(&log);
        assert_eq!(roll.formula, "1d8+1+3");
        assert_eq!(roll.flavor, "Sabre Damage");

        let mut host = ScriptedHost::new().answer("no");
        let (_, log, _) = run("DAMAGE_Sabre", "1d8+1", &mut host);
        let roll = only_roll(&log);
        assert_eq!(roll.formula, "1d8+1");
        assert_eq!(roll.flavor, "Sabre Damage");

        let mut host = ScriptedHost::new().dismiss();
        let (result, log, _) = run("DAMAGE_Sabre", "1d8+1", &mut host);
        assert_eq!(result.unwrap(), Resolution::Dismissed);
        assert!(log.is_empty());
    }

    #[test]
    fn furore_adds_willpower_without_prompt() {
        let mut host = ScriptedHost::new();
        let (_, log, _) = run("METHOD_Ritual - Furore", "2d6", &mut host);
        let roll = only_roll(&log);
        assert_eq!(roll.formula, "2d6+2");
        assert_eq!(roll.flavor, "Using Furore Method");
        assert!(host.prompts().is_empty());
    }

    #[test]
    fn bloodletting_and_gnostic_add_intellect() {
        for label in ["METHOD_Blood - Bloodletting", "METHOD_Lore - Gnostic"] {
            let mut host = ScriptedHost::new();
            let (_, log, _) = run(label, "2d6", &mut host);
            assert_eq!(only_roll(&log).formula, "2d6-2");
            assert!(host.prompts().is_empty());
        }
    }

    #[test]
    fn sacrificial_divination_uses_choice() {
        let mut host = ScriptedHost::new().answer("int");
        let (_, log, _) = run("METHOD_Omen - Sacrificial Divination", "2d6", &mut host);
        let roll = only_roll(&log);
        assert_eq!(roll.formula, "2d6-2");
        assert_eq!(roll.flavor, "Using Sacrificial Divination Method");
        assert_eq!(host.prompts()[0].options.len(), 2);
    }

    #[test]
    fn sacrificial_divination_rolls_even_when_dismissed() {
        let mut host = ScriptedHost::new().dismiss();
        let (result, log, _) = run("METHOD_Omen - Sacrificial Divination", "2d6", &mut host);
        assert_eq!(result.unwrap(), Resolution::Published);
        assert_eq!(only_roll(&log).formula, "2d6");
    }

    #[test]
    fn unknown_method_is_skipped() {
        let mut host = ScriptedHost::new();
        let (result, log, engine) = run("METHOD_Ritual - Foo", "2d6", &mut host);
        assert_eq!(result.unwrap(), Resolution::Skipped);
        assert!(log.is_empty());
        assert!(engine.formulas.is_empty());

        let (result, _, _) = run("METHOD_Furore", "2d6", &mut ScriptedHost::new());
        assert_eq!(result.unwrap(), Resolution::Skipped);
    }

    #[test]
    fn phenomenon_never_rolls() {
        let trigger =
            RollTrigger::from_label("PHENOMENON_Rift Storm", "", Some("1-3: ash falls")).unwrap();
        let mut resolver = resolver();
        let mut log = ChatLog::new();
        let result = resolver
            .resolve(&trigger, &sheet(), &mut ScriptedHost::new(), &mut log)
            .unwrap();
        assert_eq!(result, Resolution::Published);
        assert!(resolver.engine().formulas.is_empty());
        assert_eq!(
            log.messages(),
            &[ChatMessage::Announcement {
                flavor: "Rift Storm".to_string(),
                content: "1-3: ash falls".to_string(),
            }]
        );
    }

    #[test]
    fn agility_offers_four_modes() {
        let cases = [
            ("basic", "1d20+12", "Basic Agility Check"),
            ("untrained", "1d20-3", "Untrained Agility Check"),
            ("initiative", "1d20", "Initiative Roll"),
            ("untrained-attack", "1d20", "Untrained Attack Roll"),
        ];
        for (key, formula, flavor) in cases {
            let mut host = ScriptedHost::new().answer(key);
            let (_, log, _) = run("agi", "1d20+12", &mut host);
            let roll = only_roll(&log);
            assert_eq!(roll.formula, formula);
            assert_eq!(roll.flavor, flavor);
            assert_eq!(host.prompts()[0].options.len(), 4);
            assert_eq!(host.prompts()[0].default.as_deref(), Some("basic"));
        }
    }

    #[test]
    fn other_abilities_offer_two_modes() {
        let mut host = ScriptedHost::new().answer("untrained");
        let (_, log, _) = run("str", "1d20+12", &mut host);
        let roll = only_roll(&log);
        assert_eq!(roll.formula, "1d20-3");
        assert_eq!(roll.flavor, "Untrained Strength Check");
        assert_eq!(host.prompts()[0].options.len(), 2);

        let mut host = ScriptedHost::new().answer("basic");
        let (_, log, _) = run("awa", "1d20+12", &mut host);
        assert_eq!(only_roll(&log).flavor, "Basic Awareness Check");

        // Initiative is an Agility-only mode.
        let mut host = ScriptedHost::new().answer("initiative");
        let (result, log, _) = run("wil", "1d20+12", &mut host);
        assert_eq!(result.unwrap(), Resolution::Dismissed);
        assert!(log.is_empty());
    }

    #[test]
    fn untrained_without_trailing_modifier_fails_fast() {
        let mut host = ScriptedHost::new().answer("untrained");
        let (result, log, engine) = run("int", "2d6", &mut host);
        assert!(matches!(result, Err(MechError::MalformedFormula(_))));
        assert!(log.is_empty());
        assert!(engine.formulas.is_empty());
    }

    #[test]
    fn formula_references_resolve_from_sheet() {
        let mut host = ScriptedHost::new().answer("basic");
        let (_, log, _) = run("awa", "1d20+@abilities.awa.value", &mut host);
        assert_eq!(only_roll(&log).formula, "1d20+4");
    }

    #[test]
    fn untrained_penalty_comes_from_config() {
        let trigger = RollTrigger::from_label("sta", "1d20+10", None).unwrap();
        let mut resolver = RollResolver::with_engine(
            RecordingEngine::default(),
            RollConfig::default().with_untrained_penalty(-4),
        );
        let mut log = ChatLog::new();
        let mut host = ScriptedHost::new().answer("untrained");
        resolver
            .resolve(&trigger, &sheet(), &mut host, &mut log)
            .unwrap();
        assert_eq!(only_roll(&log).formula, "1d20-4");
    }

    #[test]
    fn malformed_formula_is_an_error() {
        let mut host = ScriptedHost::new();
        let (result, log, _) = run("ATTACK_Sabre", "1d20+", &mut host);
        assert!(matches!(result, Err(MechError::MalformedFormula(_))));
        assert!(log.is_empty());
    }

    #[test]
    fn malformed_formula_fails_before_prompting() {
        for label in ["SKILL_Stealth", "DAMAGE_Sabre", "agi"] {
            let mut host = ScriptedHost::new().answer("basic");
            let (result, log, _) = run(label, "1d20++", &mut host);
            assert!(matches!(result, Err(MechError::MalformedFormula(_))));
            assert!(host.prompts().is_empty(), "{label} prompted first");
            assert!(log.is_empty());
        }
    }

    #[test]
    fn seeded_resolver_rolls_real_dice() {
        let trigger = RollTrigger::from_label("ATTACK_Sabre", "1d20+5", None).unwrap();
        let mut resolver = RollResolver::new(RollConfig::default().with_seed(3));
        let mut log = ChatLog::new();
        let mut host = |_: &ChoicePrompt| -> Option<String> { None };
        resolver
            .resolve(&trigger, &sheet(), &mut host, &mut log)
            .unwrap();
        let roll = only_roll(&log);
        assert!((6..=25).contains(&roll.total));
        assert_eq!(roll.dice.count(), 1);
    }
}
