//! Terminal presentation for each problem family.
//!
//! [`Interactive`] adds the three things the run loop needs on top of a
//! family's wire contract: prompting a custom configuration, rendering a
//! generated instance, and collecting an answer.

use anyhow::Result;

use algodrill_adapters::constraint_graph::{
    ConstraintGraph, ConstraintGraphAnswer, ConstraintGraphConfig, ConstraintGraphInstance,
};
use algodrill_adapters::matrix_game::{MatrixGame, MatrixGameAnswer, MatrixGameConfig};
use algodrill_adapters::probabilistic_network::{
    ProbabilisticNetwork, ProbabilisticNetworkAnswer, ProbabilisticNetworkConfig,
};
use algodrill_adapters::search_strategy::{
    SearchStrategy, SearchStrategyAnswer, SearchStrategyConfig,
};
use algodrill_adapters::sequential_decision::{
    DecisionTask, GridSpec, SequentialDecision, SequentialDecisionAnswer, SequentialDecisionConfig,
};
use algodrill_adapters::tree_search::{TreeNode, TreeSearch, TreeSearchAnswer, TreeSearchConfig};
use algodrill_adapters::{ProblemFamily, ProblemText};

use crate::prompt;

/// A problem family the CLI can drive interactively.
pub trait Interactive: ProblemFamily {
    /// Ask the user for a custom generation configuration.
    fn prompt_config() -> Result<Self::Config>;

    /// Render a generated instance to the terminal.
    fn show(instance: &Self::Instance);

    /// Collect an answer for the shown instance.
    fn prompt_answer(instance: &Self::Instance) -> Result<Self::Answer>;
}

fn show_text(text: &ProblemText) {
    println!("\n{}", text.title);
    println!("{}", text.description);
    println!("{}", text.requirement);
    if let Some(note) = &text.note {
        println!("({note})");
    }
}

impl Interactive for TreeSearch {
    fn prompt_config() -> Result<Self::Config> {
        let depth = prompt::read_optional::<u32>("Tree depth (empty = random)")?;
        let is_maximizing =
            prompt::read_optional::<bool>("Maximizing root, true/false (empty = random)")?;
        Ok(TreeSearchConfig {
            random_depth: depth.is_none(),
            depth,
            random_root: is_maximizing.is_none(),
            is_maximizing_player: is_maximizing,
        })
    }

    fn show(instance: &Self::Instance) {
        show_text(&instance.text);
        println!(
            "Depth {}, root is a {} node:",
            instance.depth,
            if instance.is_maximizing_player {
                "MAX"
            } else {
                "MIN"
            }
        );
        render_tree(&instance.tree, 0);
    }

    fn prompt_answer(_instance: &Self::Instance) -> Result<Self::Answer> {
        Ok(TreeSearchAnswer {
            root_value: prompt::read_parse("Value at the root")?,
            visited_nodes: prompt::read_parse("Leaves visited by the pruning traversal")?,
        })
    }
}

fn render_tree(node: &TreeNode, indent: usize) {
    let pad = "  ".repeat(indent);
    match node.value {
        Some(value) => println!("{pad}{} = {value}", node.name),
        None => println!("{pad}{}", node.name),
    }
    for child in &node.children {
        render_tree(child, indent + 1);
    }
}

impl Interactive for MatrixGame {
    fn prompt_config() -> Result<Self::Config> {
        let rows = prompt::read_optional::<u32>("Rows (empty = random)")?;
        let cols = prompt::read_optional::<u32>("Columns (empty = random)")?;
        Ok(MatrixGameConfig {
            random_size: rows.is_none() && cols.is_none(),
            rows,
            cols,
        })
    }

    fn show(instance: &Self::Instance) {
        show_text(&instance.text);
        println!("Payoffs (player 1, player 2):");
        for row in &instance.matrix.grid {
            let cells: Vec<String> = row.iter().map(|(a, b)| format!("({a:>3},{b:>3})")).collect();
            println!("  {}", cells.join(" "));
        }
    }

    fn prompt_answer(instance: &Self::Instance) -> Result<Self::Answer> {
        let has_equilibrium = prompt::read_bool("Does a pure equilibrium exist?")?;
        let equilibrium_point = if has_equilibrium {
            let row = prompt::read_choice("Equilibrium row", instance.matrix.rows as usize)?;
            let col = prompt::read_choice("Equilibrium column", instance.matrix.cols as usize)?;
            Some((row as u32, col as u32))
        } else {
            None
        };
        Ok(MatrixGameAnswer {
            has_equilibrium,
            equilibrium_point,
        })
    }
}

impl Interactive for ConstraintGraph {
    fn prompt_config() -> Result<Self::Config> {
        let graph_size = prompt::read_optional::<u32>("Graph size (empty = random)")?;
        let algorithm = prompt::read_optional::<String>("Algorithm (empty = random)")?;
        let prefill_level = prompt::read_optional::<String>("Prefill level (empty = random)")?;
        Ok(ConstraintGraphConfig {
            random_graph: graph_size.is_none(),
            graph_size,
            random_algo: algorithm.is_none(),
            algorithm,
            random_prefill: prefill_level.is_none(),
            prefill_level,
        })
    }

    fn show(instance: &Self::Instance) {
        show_text(&instance.text);
        println!("Algorithm: {}", instance.algorithm_name);
        println!("Colors: {}", instance.available_colors.join(", "));
        println!("Edges:");
        for edge in &instance.graph.edges {
            println!(
                "  {} - {}",
                node_label(instance, edge.source),
                node_label(instance, edge.target)
            );
        }
        if !instance.assignments.is_empty() {
            println!("Prefilled:");
            for (variable, color) in &instance.assignments {
                println!("  {variable} = {color}");
            }
        }
        println!("Remaining domains:");
        for (variable, domain) in &instance.domains {
            println!("  {variable}: {}", domain.join(", "));
        }
    }

    fn prompt_answer(instance: &Self::Instance) -> Result<Self::Answer> {
        let mut assignments = instance.assignments.clone();
        for variable in &instance.all_variables {
            if assignments.contains_key(variable) {
                continue;
            }
            loop {
                let color = prompt::read_line(&format!("Color for {variable}"))?;
                if instance.available_colors.contains(&color) {
                    assignments.insert(variable.clone(), color);
                    break;
                }
                eprintln!(
                    "pick one of: {}",
                    instance.available_colors.join(", ")
                );
            }
        }
        Ok(ConstraintGraphAnswer { assignments })
    }
}

fn node_label(instance: &ConstraintGraphInstance, id: u32) -> &str {
    instance
        .graph
        .nodes
        .iter()
        .find(|n| n.id == id)
        .map(|n| n.label.as_str())
        .unwrap_or("?")
}

impl Interactive for ProbabilisticNetwork {
    fn prompt_config() -> Result<Self::Config> {
        let p_rain = prompt::read_optional::<f64>("P(rain) (empty = random)")?;
        let p_sprinkler = prompt::read_optional::<f64>("P(sprinkler) (empty = random)")?;
        Ok(ProbabilisticNetworkConfig {
            random_priors: p_rain.is_none() && p_sprinkler.is_none(),
            p_rain,
            p_sprinkler,
        })
    }

    fn show(instance: &Self::Instance) {
        show_text(&instance.text);
        println!(
            "Priors: P(rain) = {}, P(sprinkler) = {}",
            instance.priors.p_rain, instance.priors.p_sprinkler
        );
    }

    fn prompt_answer(_instance: &Self::Instance) -> Result<Self::Answer> {
        Ok(ProbabilisticNetworkAnswer {
            probability: prompt::read_parse("Posterior probability (0 to 1)")?,
        })
    }
}

impl Interactive for SequentialDecision {
    fn prompt_config() -> Result<Self::Config> {
        let mut config = SequentialDecisionConfig::default();
        loop {
            let raw = prompt::read_line("Task, [v]alue iteration or [q]-learning")?;
            match raw.to_lowercase().as_str() {
                "v" | "value" | "value iteration" => {
                    config.task = DecisionTask::ValueIteration;
                    break;
                }
                "q" | "q-learning" | "q learning" => {
                    config.task = DecisionTask::QLearning;
                    break;
                }
                _ => eprintln!("answer v or q"),
            }
        }
        if let Some(rows) = prompt::read_optional::<u32>("Rows (empty = 3)")? {
            config.rows = rows;
        }
        if let Some(cols) = prompt::read_optional::<u32>("Columns (empty = 4)")? {
            config.cols = cols;
        }
        if let Some(gamma) = prompt::read_optional::<f64>("Gamma (empty = random)")? {
            config.gamma = gamma;
            config.random_gamma = false;
        }
        match config.task {
            DecisionTask::ValueIteration => {
                if let Some(reward) = prompt::read_optional::<f64>("Step reward (empty = random)")?
                {
                    config.step_reward = reward;
                    config.random_step_reward = false;
                }
            }
            DecisionTask::QLearning => {
                if let Some(alpha) = prompt::read_optional::<f64>("Alpha (empty = random)")? {
                    config.alpha = alpha;
                    config.random_alpha = false;
                }
            }
        }
        Ok(config)
    }

    fn show(instance: &Self::Instance) {
        show_text(&instance.text);
        if let Some(grid) = &instance.grid {
            render_grid(grid);
        }
        if let Some(q) = &instance.q_data {
            println!("gamma = {}, alpha = {}", q.gamma, q.alpha);
        }
        println!("Compute: {}", instance.question_target);
    }

    fn prompt_answer(instance: &Self::Instance) -> Result<Self::Answer> {
        Ok(SequentialDecisionAnswer {
            value: prompt::read_parse(&format!("Value of {}", instance.question_target))?,
        })
    }
}

fn render_grid(grid: &GridSpec) {
    for row in 0..grid.rows {
        let cells: Vec<String> = (0..grid.cols)
            .map(|col| {
                if grid.walls.contains(&(row, col)) {
                    "  ##  ".to_string()
                } else if let Some(reward) = grid.terminals.get(&format!("{row},{col}")) {
                    format!("{reward:+.2}")
                } else {
                    "  .   ".to_string()
                }
            })
            .collect();
        println!("  {}", cells.join(" "));
    }
    println!(
        "step reward = {}, gamma = {}",
        grid.step_reward, grid.gamma
    );
}

impl Interactive for SearchStrategy {
    fn prompt_config() -> Result<Self::Config> {
        let option_count = prompt::read_optional::<u32>("Number of options (empty = random)")?;
        Ok(SearchStrategyConfig {
            random_pool: option_count.is_none(),
            option_count,
        })
    }

    fn show(instance: &Self::Instance) {
        println!("\n{}", instance.problem_name);
        println!("{}", instance.description);
        for (index, option) in instance.options.iter().enumerate() {
            println!("  {}. {option}", index + 1);
        }
    }

    fn prompt_answer(instance: &Self::Instance) -> Result<Self::Answer> {
        let picked = prompt::read_choice("Best-suited strategy", instance.options.len())?;
        Ok(SearchStrategyAnswer {
            chosen_strategy: instance.options[picked].clone(),
        })
    }
}
