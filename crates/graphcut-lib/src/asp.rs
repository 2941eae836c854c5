/*!
Answer-Set Programming backend.

The graph and the group count are compiled into a small logic program, handed
to an external ASP solver (clingo-compatible output is expected), and the
last — i.e. best — answer set is decoded back into a partition.

Two semantic quirks of this backend, both deliberate and documented:

- The size constraint demands *strictly equal* group sizes, so the program is
  unsatisfiable unless n is divisible by k. Every other algorithm in the
  crate tolerates a one-vertex imbalance.
- Edge weights are emitted as truncated integers (`floor(W[i,j])`); ASP
  aggregates operate on integers.

The emitted program is staged at a configured path and removed on every exit
path, success or failure. The solver binary is configuration as well.
*/

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algorithms::{check_k, Partitioner};
use crate::error::PartitionError;
use crate::model::{Graph, Partition};

/// Where the logic program is staged and which solver runs it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AspConfig {
    /// Solver binary. Resolved through `PATH` when not absolute.
    pub solver: PathBuf,
    /// Path the emitted program is written to before the solver runs.
    pub program_path: PathBuf,
}

impl Default for AspConfig {
    fn default() -> Self {
        Self {
            solver: PathBuf::from("clingo"),
            program_path: std::env::temp_dir().join("graphcut-partition.lp"),
        }
    }
}

/// Partitioning through the external ASP solver. `k >= 1`; the weighted
/// flavor requires a weights matrix.
pub struct LogicalProgramming {
    config: AspConfig,
    weighted: bool,
}

impl LogicalProgramming {
    pub fn new(config: AspConfig, weighted: bool) -> Self {
        Self { config, weighted }
    }
}

impl Partitioner for LogicalProgramming {
    fn name(&self) -> &'static str {
        if self.weighted {
            "logical-weighted"
        } else {
            "logical"
        }
    }

    fn partition(&mut self, graph: &Graph, k: usize) -> Result<Partition, PartitionError> {
        solve(graph, k, &self.config, self.weighted)
    }
}

/// Emit the logic program for `graph` and `k`.
pub fn emit_program(graph: &Graph, k: usize, weighted: bool) -> Result<String, PartitionError> {
    let n = graph.vertex_count();
    if n == 0 {
        return Err(PartitionError::InvalidInput(
            "cannot emit a program for an empty graph".to_string(),
        ));
    }
    let weights = if weighted {
        Some(graph.require_weights()?)
    } else {
        None
    };

    let mut program = String::new();
    let _ = writeln!(program, "vertex(0..{}).", n - 1);
    for (i, j) in graph.edges() {
        match weights {
            Some(w) => {
                let _ = writeln!(program, "edge({i},{j},{}).", w[(i, j)].floor() as i64);
            }
            None => {
                let _ = writeln!(program, "edge({i},{j}).");
            }
        }
    }
    let _ = writeln!(program, "k({k}).");
    let _ = writeln!(program, "1 {{ part(V, 1..K) }} :- vertex(V), k(K).");
    if weighted {
        let _ = writeln!(
            program,
            "cut_edge(X,Y,W) :- edge(X,Y,W), part(X,P1), part(Y,P2), P1 != P2."
        );
        let _ = writeln!(program, "#minimize {{ W,X,Y : cut_edge(X,Y,W) }}.");
    } else {
        let _ = writeln!(
            program,
            "cut_edge(X,Y) :- edge(X,Y), part(X,P1), part(Y,P2), P1 != P2."
        );
        let _ = writeln!(program, "#minimize {{ 1,X,Y : cut_edge(X,Y) }}.");
    }
    let _ = writeln!(
        program,
        "part_size(P,S) :- S = #count {{ V : part(V,P) }}, k(K), P = 1..K."
    );
    let _ = writeln!(
        program,
        ":- k(K), P1=1..K, P2=1..K, P1<P2, part_size(P1,S1), part_size(P2,S2), S1 != S2."
    );
    let _ = writeln!(program, "#show part/2.");
    Ok(program)
}

/// Emit, run the solver, and decode the best answer.
///
/// # Errors
///
/// - `SolverUnavailable` when the solver binary cannot be started.
/// - `NoSolution` when the program is unsatisfiable (in particular when n is
///   not divisible by k).
/// - `SolverOutputMalformed` when the output lacks the expected answer
///   structure.
pub fn solve(
    graph: &Graph,
    k: usize,
    config: &AspConfig,
    weighted: bool,
) -> Result<Partition, PartitionError> {
    check_k(graph, k, 1)?;
    let program = emit_program(graph, k, weighted)?;

    fs::write(&config.program_path, &program)?;
    let program_path = config.program_path.clone();
    let _cleanup = scopeguard::guard(program_path, |path| {
        let _ = fs::remove_file(path);
    });

    debug!(solver = %config.solver.display(), "invoking ASP solver");
    let output = Command::new(&config.solver)
        .arg(&config.program_path)
        .output()
        .map_err(|e| {
            PartitionError::SolverUnavailable(format!("{}: {e}", config.solver.display()))
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_best_answer(&stdout, graph.vertex_count(), k)
}

/// Decode the last `Answer:` block of clingo-style output into a partition.
pub fn parse_best_answer(
    stdout: &str,
    n: usize,
    k: usize,
) -> Result<Partition, PartitionError> {
    if stdout.contains("UNSATISFIABLE") {
        return Err(PartitionError::NoSolution(
            "program is unsatisfiable (equal group sizes require n divisible by k)".to_string(),
        ));
    }

    let mut model: Option<&str> = None;
    let mut lines = stdout.lines();
    while let Some(line) = lines.next() {
        if line.trim_start().starts_with("Answer:") {
            model = lines.next();
        }
    }
    let atoms = model.ok_or_else(|| {
        PartitionError::SolverOutputMalformed("no Answer block in solver output".to_string())
    })?;

    let mut groups = vec![Vec::new(); k];
    let mut seen = vec![false; n];
    for token in atoms.split_whitespace() {
        let args = token
            .strip_prefix("part(")
            .and_then(|t| t.strip_suffix(')'))
            .ok_or_else(|| {
                PartitionError::SolverOutputMalformed(format!("unexpected atom '{token}'"))
            })?;
        let (v, p) = args.split_once(',').ok_or_else(|| {
            PartitionError::SolverOutputMalformed(format!("unexpected atom '{token}'"))
        })?;
        let v: usize = v.trim().parse().map_err(|_| {
            PartitionError::SolverOutputMalformed(format!("bad vertex in '{token}'"))
        })?;
        let p: usize = p.trim().parse().map_err(|_| {
            PartitionError::SolverOutputMalformed(format!("bad group in '{token}'"))
        })?;
        if v >= n || p == 0 || p > k {
            return Err(PartitionError::SolverOutputMalformed(format!(
                "atom '{token}' out of range for n = {n}, k = {k}"
            )));
        }
        if seen[v] {
            return Err(PartitionError::SolverOutputMalformed(format!(
                "vertex {v} assigned to more than one group"
            )));
        }
        seen[v] = true;
        groups[p - 1].push(v);
    }
    if let Some(v) = seen.iter().position(|&s| !s) {
        return Err(PartitionError::SolverOutputMalformed(format!(
            "vertex {v} missing from the answer"
        )));
    }
    Ok(Partition::new(groups))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn triangle_pair() -> Graph {
        // Two triangles joined by a single edge 2-3.
        let mut a = ndarray::Array2::<f64>::zeros((6, 6));
        for &(i, j) in &[(0, 1), (0, 2), (1, 2), (3, 4), (3, 5), (4, 5), (2, 3)] {
            a[(i, j)] = 1.0;
            a[(j, i)] = 1.0;
        }
        Graph::new(a).unwrap()
    }

    #[test]
    fn emits_expected_facts_and_rules() {
        let graph = triangle_pair();
        let program = emit_program(&graph, 2, false).unwrap();
        assert!(program.contains("vertex(0..5)."));
        assert!(program.contains("edge(0,1)."));
        assert!(program.contains("edge(2,3)."));
        assert!(program.contains("k(2)."));
        assert!(program.contains("1 { part(V, 1..K) } :- vertex(V), k(K)."));
        assert!(program.contains("#minimize { 1,X,Y : cut_edge(X,Y) }."));
        assert!(program.contains("S1 != S2."));
        assert!(program.contains("#show part/2."));
    }

    #[test]
    fn weighted_emission_truncates_to_integers() {
        let a = array![[0.0, 1.0], [1.0, 0.0]];
        let w = array![[0.0, 2.7], [2.7, 0.0]];
        let graph = Graph::with_weights(a, w).unwrap();
        let program = emit_program(&graph, 2, true).unwrap();
        assert!(program.contains("edge(0,1,2)."));
        assert!(program.contains("#minimize { W,X,Y : cut_edge(X,Y,W) }."));
    }

    #[test]
    fn parses_last_answer_block() {
        let stdout = "clingo version 5.6.2\n\
                      Solving...\n\
                      Answer: 1\n\
                      part(0,1) part(1,1) part(2,2) part(3,2)\n\
                      Optimization: 3\n\
                      Answer: 2\n\
                      part(0,1) part(1,2) part(2,1) part(3,2)\n\
                      Optimization: 2\n\
                      OPTIMUM FOUND\n";
        let partition = parse_best_answer(stdout, 4, 2).unwrap();
        assert_eq!(partition.groups(), &[vec![0, 2], vec![1, 3]]);
    }

    #[test]
    fn unsatisfiable_maps_to_no_solution() {
        let stdout = "Solving...\nUNSATISFIABLE\n";
        assert!(matches!(
            parse_best_answer(stdout, 3, 2),
            Err(PartitionError::NoSolution(_))
        ));
    }

    #[test]
    fn missing_answer_is_malformed() {
        assert!(matches!(
            parse_best_answer("Solving...\n", 2, 2),
            Err(PartitionError::SolverOutputMalformed(_))
        ));
    }

    #[test]
    fn incomplete_answer_is_malformed() {
        let stdout = "Answer: 1\npart(0,1)\n";
        assert!(matches!(
            parse_best_answer(stdout, 2, 2),
            Err(PartitionError::SolverOutputMalformed(_))
        ));
    }

    #[test]
    fn missing_solver_binary_is_unavailable() {
        let graph = triangle_pair();
        let dir = tempfile::tempdir().unwrap();
        let config = AspConfig {
            solver: PathBuf::from("/nonexistent/graphcut-test-solver"),
            program_path: dir.path().join("program.lp"),
        };
        let err = solve(&graph, 2, &config, false).unwrap_err();
        assert!(matches!(err, PartitionError::SolverUnavailable(_)));
        // The staged program must be cleaned up even on failure.
        assert!(!config.program_path.exists());
    }
}
