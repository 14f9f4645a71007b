//! Console front-end for the duelboard engine.
//!
//! Owns everything the engine does not: stdin prompting with
//! re-prompt-until-valid input, card and board rendering, and the
//! human-driven participant.

use std::io::Write as _;
use std::time::{SystemTime, UNIX_EPOCH};

use log::LevelFilter;
use smallvec::SmallVec;

use duelboard::{
    Board, BoardEvent, Card, Choice, Deck, Faction, Game, GameUpdate, Graveyard, Hand,
    Participant, ParticipantId, ParticipantState, PlayDecision, RosterEntry, ScriptedAi,
    Strategy, CARD_ATTRIBUTES, HAND_SIZE,
};

fn main() {
    let _ = simple_logging::log_to_file("duelboard.log", LevelFilter::Debug);

    print_banner();

    let count = prompt_number("How many participants? (2-4)", 2, 4);
    let mut participants: Vec<Box<dyn Participant>> = Vec::new();
    let mut factions = Vec::new();
    let seed = clock_seed();

    for i in 0..count {
        let id = ParticipantId::new(i as u8);
        println!("--- Seat {i} ---");
        let kind = prompt_choice("Human or Computer?", &["human", "computer"]);
        if kind == "human" {
            let name = prompt_line("Name for this player:");
            participants.push(Box::new(Human::new(id, name)));
        } else {
            for strategy in [Strategy::Logical, Strategy::Random, Strategy::Dumb] {
                println!("  {} - {}", strategy.name(), strategy.description());
            }
            let strategy = loop {
                let input = prompt_line("Computer strategy:");
                if let Some(s) = Strategy::parse(&input) {
                    break s;
                }
                println!("Unknown strategy '{}'.", input.trim());
            };
            let name = format!("PC{i}-{}", strategy.name());
            println!("Seated {name}.");
            participants.push(Box::new(ScriptedAi::new(id, name, strategy, seed + i as u64)));
        }

        for faction in Faction::ALL {
            println!("== {} ==\n{}", faction.name(), faction.description());
        }
        let faction = loop {
            let input = prompt_line("Faction for this seat:");
            if let Some(f) = Faction::parse(&input) {
                break f;
            }
            println!("Unknown faction '{}'.", input.trim());
        };
        factions.push(faction);
    }

    let rounds = prompt_number("How many rounds?", 1, 9) as u32;
    let names: Vec<String> = participants.iter().map(|p| p.name().to_string()).collect();

    let mut game = Game::new(participants, factions, rounds, seed);
    let outcome = match game.run(|update| render_update(&update, &names)) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("engine error: {err}");
            return;
        }
    };

    println!("\n=====[ Game over! ]=====");
    for result in &outcome.rounds {
        println!("Round {}:", result.number);
        for &(id, score) in &result.scores {
            println!("  {}: {}", names[id.index()], score);
        }
    }
    for &(id, wins) in &outcome.round_wins {
        println!("{} won {wins} round(s)", names[id.index()]);
    }
    match outcome.winner {
        Some(id) => println!("The winner of the game is {}!", names[id.index()]),
        None => println!("The game ended in an overall draw. No one wins!"),
    }
}

fn print_banner() {
    println!("=====[ duelboard - a turn-based card battle ]=====");
    println!("Each turn you draw a card, then play one from your hand with");
    println!("one of its three attributes against a chosen board. Timed");
    println!("attributes resolve a few turns later. A card whose power");
    println!("drops to zero is destroyed. Highest total board power wins");
    println!("the round; most round wins takes the game.\n");
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn render_update(update: &GameUpdate, names: &[String]) {
    match update {
        GameUpdate::RoundStarted { round } => {
            println!("\n=====[ Round {round} ]=====");
        }
        GameUpdate::TurnStarted { turn, participant, .. } => {
            println!("\n--[ Turn {turn}: {} ]--", names[participant.index()]);
        }
        GameUpdate::CardDrawn { participant, card } => {
            println!("{} drew {card}.", names[participant.index()]);
        }
        GameUpdate::UnableToDraw { participant } => {
            println!("{} has no cards left in the deck to draw.", names[participant.index()]);
        }
        GameUpdate::OutOfCards { participant, total_power } => {
            println!(
                "{} is out of cards and passes (total power {total_power}).",
                names[participant.index()]
            );
        }
        GameUpdate::Passed { participant } => {
            println!("{} passes.", names[participant.index()]);
        }
        GameUpdate::TurnSkipped { participant } => {
            println!("{} has already passed.", names[participant.index()]);
        }
        GameUpdate::Board(event) => render_board_event(event, names),
        GameUpdate::RoundFinished(result) => {
            println!("\n=====[ Round {} result ]=====", result.number);
            for &(id, score) in &result.scores {
                println!("  {}: {}", names[id.index()], score);
            }
            if result.draw {
                println!("A draw between {} participants!", result.winners.len());
            } else {
                println!("Round winner: {}", names[result.winners[0].index()]);
            }
        }
    }
}

fn render_board_event(event: &BoardEvent, names: &[String]) {
    // Most events read fine as-is; the ones naming a participant get the
    // seat's actual name.
    match event {
        BoardEvent::CardPlaced { participant, card, position } => {
            println!("{card} was added to {}'s board (position {position}).", names[participant.index()]);
        }
        BoardEvent::CardDestroyed { participant, card } => {
            println!("{}'s card has been destroyed - {card}!", names[participant.index()]);
        }
        other => println!("{other}"),
    }
}

// === prompting ===

fn prompt_line(message: &str) -> String {
    loop {
        print!("{message} ");
        let _ = std::io::stdout().flush();
        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err() {
            continue;
        }
        let trimmed = input.trim().to_string();
        if !trimmed.is_empty() {
            return trimmed;
        }
    }
}

fn prompt_number(message: &str, low: usize, high: usize) -> usize {
    loop {
        let input = prompt_line(message);
        match input.parse::<usize>() {
            Ok(n) if (low..=high).contains(&n) => return n,
            _ => println!("Please enter a number between {low} and {high}."),
        }
    }
}

fn prompt_choice(message: &str, options: &[&str]) -> String {
    loop {
        let input = prompt_line(message).to_ascii_lowercase();
        if options.contains(&input.as_str()) {
            return input;
        }
        println!("Please answer one of: {}.", options.join(", "));
    }
}

// === rendering ===

fn render_card(card: &Card) {
    println!("|-------------------------------|");
    println!("| Name: {:<24}|", truncate(card.name(), 24));
    println!("| Power: {:<23}|", card.power());
    println!("| Resilience: {:<18}|", card.resilience());
    for (i, attribute) in card.attributes().iter().enumerate() {
        println!("| A{}: {:<26}|", i, truncate(attribute.name(), 26));
    }
    println!("|-------------------------------|");
}

fn render_attributes(card: &Card) {
    println!("----[ {} - attributes ]----", card.name());
    for (i, attribute) in card.attributes().iter().enumerate() {
        println!("[{i}] {}", attribute.name());
        println!("    kind: {}", attribute.kind().name());
        println!("    magnitude: {}", attribute.magnitude());
        println!("    targets: {}", attribute.target_count());
        match attribute.timing() {
            duelboard::Timing::Immediate => println!("    timing: immediate"),
            duelboard::Timing::Delayed { turns } => println!("    timing: {turns} turns after play"),
        }
        if !attribute.description().is_empty() {
            println!("    {}", attribute.description());
        }
    }
}

fn render_zone(board: &Board, id: ParticipantId, name: &str) {
    println!("----[ board of {name} - power {} ]----", board.total_power(id));
    if board.card_count(id) == 0 {
        println!("(no cards)");
        return;
    }
    for (i, card) in board.zone(id).iter().enumerate() {
        println!("board index {i}:");
        render_card(card);
    }
}

fn render_graveyard(graveyard: &Graveyard) {
    if graveyard.count() == 0 {
        println!("(graveyard is empty)");
        return;
    }
    for (i, card) in graveyard.iter().enumerate() {
        println!("graveyard index {i}:");
        render_card(card);
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        text.to_string()
    } else {
        format!("{}(...)", &text[..max.saturating_sub(5)])
    }
}

// === the human seat ===

/// A participant driven from stdin. All validation happens here, by
/// re-prompting, so the engine only ever sees well-formed decisions.
struct Human {
    state: ParticipantState,
}

impl Human {
    fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self { state: ParticipantState::new(id, name) }
    }
}

impl Participant for Human {
    fn id(&self) -> ParticipantId {
        self.state.id
    }

    fn name(&self) -> &str {
        &self.state.name
    }

    fn hand(&self) -> &Hand {
        &self.state.hand
    }

    fn hand_mut(&mut self) -> &mut Hand {
        &mut self.state.hand
    }

    fn deck(&self) -> &Deck {
        &self.state.deck
    }

    fn deck_mut(&mut self) -> &mut Deck {
        &mut self.state.deck
    }

    fn graveyard(&self) -> &Graveyard {
        &self.state.graveyard
    }

    fn graveyard_mut(&mut self) -> &mut Graveyard {
        &mut self.state.graveyard
    }

    fn has_passed(&self) -> bool {
        self.state.passed
    }

    fn set_passed(&mut self, passed: bool) {
        self.state.passed = passed;
    }

    fn prepare_round(&mut self, deck: Deck) {
        self.state.reset(deck);
    }

    fn decide(&mut self, board: &Board, roster: &[RosterEntry]) -> Choice {
        println!("\n{}: your hand:", self.state.name);
        for (i, card) in self.state.hand.iter() {
            println!("hand index {i}:");
            render_card(card);
        }

        if prompt_line("Type 'pass' to pass this turn, anything else to play:")
            .eq_ignore_ascii_case("pass")
        {
            return Choice::Pass;
        }

        if prompt_line("Type 'grave' to check your graveyard first, anything else to skip:")
            .eq_ignore_ascii_case("grave")
        {
            render_graveyard(&self.state.graveyard);
        }

        // Card and attribute selection, with a way to back out of the card.
        let (card, attribute_index) = loop {
            let slot = loop {
                let slot = prompt_number("Card index to play?", 0, HAND_SIZE - 1);
                if self.state.hand.has_card_at(slot) {
                    break slot;
                }
                println!("No card at that index.");
            };
            let chosen = self.state.hand.card_at(slot).expect("slot checked above");
            render_attributes(chosen);

            if prompt_line("Type 'back' to pick a different card, anything else to continue:")
                .eq_ignore_ascii_case("back")
            {
                continue;
            }

            let attribute_index =
                prompt_number("Attribute index to play with?", 0, CARD_ATTRIBUTES - 1);
            let card = self.state.hand.remove_at(slot).expect("slot checked above");
            break (card, attribute_index);
        };

        for entry in roster {
            println!("[{}] {}", entry.id.index(), entry.name);
        }
        let target_index = prompt_number("Whose board do you target?", 0, roster.len() - 1);
        let target_participant = roster[target_index].id;
        render_zone(board, target_participant, &roster[target_index].name);

        let wanted = card.attributes()[attribute_index].target_count();
        let on_board = board.card_count(target_participant);
        let target_slots: SmallVec<[usize; 4]> = if on_board == 0 {
            println!("No cards on that board; yours will be placed without triggering.");
            SmallVec::new()
        } else {
            (0..wanted)
                .map(|i| {
                    prompt_number(
                        &format!("Target {}/{} (board index)?", i + 1, wanted),
                        0,
                        on_board - 1,
                    )
                })
                .collect()
        };

        Choice::Play(PlayDecision {
            participant: self.state.id,
            card,
            attribute_index,
            target_participant,
            target_slots,
        })
    }
}
