//! Slab orchestration: the front loop, tent construction, and the DAG.

use std::sync::Arc;

use smallvec::SmallVec;
use tents_core::{ElementId, FacetId, TentId, Vec3, VertexId};
use tents_mesh::{mesh_geometry, MeshGraph, SimplexGeometry, WaveSpeedField};
use tracing::{debug, info, info_span, trace};

use crate::config::PitchConfig;
use crate::dag::DependencyTable;
use crate::error::PitchError;
use crate::front::FrontState;
use crate::pitcher::TentSlabPitcher;
use crate::strategy::{MeshData, PoleHeightStrategy};
use crate::tent::Tent;

/// Relative distance to the slab top below which a tent snaps to it.
const TOP_SNAP_RTOL: f64 = 1e-14;

/// Counters collected while pitching one slab.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PitchStats {
    /// Tents produced.
    pub tents: usize,
    /// Distinct tent levels.
    pub levels: u32,
    /// Successful ready-set rounds.
    pub rounds: u64,
    /// Times the advance factor was halved because no vertex was ready.
    pub stall_recoveries: u64,
    /// Smallest advance factor used.
    pub min_adv_factor: f64,
}

/// The tents covering the spacetime slab `mesh × [bottom, bottom + dt]`.
///
/// Tents are stored in pitch order, which is a topological order of the
/// dependency table. Tent levels group them into layers of mutually
/// independent tents.
///
/// # Examples
///
/// ```
/// use tents_mesh::{Mesh, MeshGraph, WaveSpeedField};
/// use tents_pitch::{PitchConfig, TentPitchedSlab};
///
/// let graph = MeshGraph::non_periodic(Mesh::interval(0.0, 4.0, 4).unwrap());
/// let mut slab = TentPitchedSlab::new(graph, PitchConfig::default()).unwrap();
/// slab.pitch_tents(0.5, &WaveSpeedField::Constant(1.0)).unwrap();
///
/// assert_eq!(slab.n_tents(), 5);
/// assert_eq!(slab.n_levels(), 2);
/// assert!(slab.front_top().iter().all(|&t| t == 0.5));
/// ```
#[derive(Debug)]
pub struct TentPitchedSlab {
    graph: Arc<MeshGraph>,
    config: PitchConfig,
    pitcher: TentSlabPitcher,
    dt: f64,
    tents: Vec<Tent>,
    table: DependencyTable,
    n_levels: u32,
    element_speeds: Vec<f64>,
    front_bottom: Vec<f64>,
    front_top: Vec<f64>,
    stats: PitchStats,
}

impl TentPitchedSlab {
    /// An empty slab using the strategy named in `config`.
    ///
    /// # Errors
    ///
    /// [`PitchError::Config`] if the configuration is invalid.
    pub fn new(
        graph: impl Into<Arc<MeshGraph>>,
        config: PitchConfig,
    ) -> Result<Self, PitchError> {
        let strategy = config.method.strategy();
        Self::with_strategy(graph, strategy, config)
    }

    /// An empty slab using a custom strategy; `config.method` is ignored.
    ///
    /// # Errors
    ///
    /// [`PitchError::Config`] if the configuration is invalid,
    /// [`PitchError::UnsupportedDimension`] if the strategy cannot handle
    /// the mesh.
    pub fn with_strategy(
        graph: impl Into<Arc<MeshGraph>>,
        strategy: Box<dyn PoleHeightStrategy>,
        config: PitchConfig,
    ) -> Result<Self, PitchError> {
        config.validate()?;
        let graph = graph.into();
        let dim = graph.mesh().dim();
        if !strategy.supports_dimension(dim) {
            return Err(PitchError::UnsupportedDimension {
                strategy: strategy.name().to_owned(),
                dim,
            });
        }
        let pitcher = TentSlabPitcher::new(strategy, config.global_ct);
        Ok(Self {
            graph,
            config,
            pitcher,
            dt: 0.0,
            tents: Vec::new(),
            table: DependencyTable::new(),
            n_levels: 0,
            element_speeds: Vec::new(),
            front_bottom: Vec::new(),
            front_top: Vec::new(),
            stats: PitchStats::default(),
        })
    }

    /// Pitch tents over a flat bottom front at time zero.
    pub fn pitch_tents(&mut self, dt: f64, speeds: &WaveSpeedField) -> Result<(), PitchError> {
        let bottom = vec![0.0; self.graph.mesh().n_vertices()];
        self.pitch_tents_from(&bottom, dt, speeds)
    }

    /// Pitch tents from `bottom` up to `bottom + dt`.
    ///
    /// `bottom` is usually the [`front_top`](Self::front_top) of the
    /// previous slab. Any earlier tents are discarded first; on error the
    /// slab is left empty.
    ///
    /// # Errors
    ///
    /// - [`PitchError::InvalidSlabHeight`] if `dt` is not finite and positive.
    /// - [`PitchError::InvalidFront`] / [`PitchError::InconsistentPeriodicity`]
    ///   if `bottom` does not fit the mesh.
    /// - [`PitchError::InvalidGeometry`] for bad wave speeds or degenerate
    ///   elements.
    /// - [`PitchError::FrontStalled`] if the front cannot be completed.
    pub fn pitch_tents_from(
        &mut self,
        bottom: &[f64],
        dt: f64,
        speeds: &WaveSpeedField,
    ) -> Result<(), PitchError> {
        self.reset();
        let span = info_span!("pitch_tents", dt, method = self.pitcher.strategy_name());
        let _guard = span.enter();

        if !(dt.is_finite() && dt > 0.0) {
            return Err(PitchError::InvalidSlabHeight { dt });
        }
        let graph: &MeshGraph = &self.graph;
        check_bottom(graph, bottom)?;

        let cmax = speeds.element_speeds(graph.mesh())?;
        let geometry = mesh_geometry(graph.mesh())?;
        self.pitcher.initialize_mesh_data(&MeshData {
            graph,
            geometry: &geometry,
            cmax: &cmax,
        })?;
        self.pitcher.compute_vertices_reference_height(graph, dt);

        let mut front = FrontState::new(graph, bottom, dt);
        self.pitcher.init_ktilde(&mut front, graph);
        let mut run = FrontRun {
            pitcher: &self.pitcher,
            graph,
            geometry: &geometry,
            config: &self.config,
            dt,
            tents: Vec::new(),
            table: DependencyTable::new(),
            stats: PitchStats {
                min_adv_factor: self.config.initial_adv_factor,
                ..PitchStats::default()
            },
        };
        run.advance_front(&mut front)?;

        let FrontRun {
            mut tents,
            table,
            mut stats,
            ..
        } = run;
        for (i, tent) in tents.iter_mut().enumerate() {
            tent.dependents = SmallVec::from_slice(table.dependents(TentId(i as u32)));
        }
        let n_levels = tents.iter().map(|t| t.level + 1).max().unwrap_or(0);
        stats.tents = tents.len();
        stats.levels = n_levels;
        info!(
            tents = stats.tents,
            levels = n_levels,
            rounds = stats.rounds,
            stall_recoveries = stats.stall_recoveries,
            "slab pitched"
        );

        self.dt = dt;
        self.tents = tents;
        self.table = table;
        self.n_levels = n_levels;
        self.element_speeds = cmax;
        self.front_bottom = bottom.to_vec();
        self.front_top = front.into_times();
        self.stats = stats;
        Ok(())
    }

    fn reset(&mut self) {
        self.dt = 0.0;
        self.tents.clear();
        self.table = DependencyTable::new();
        self.n_levels = 0;
        self.element_speeds.clear();
        self.front_bottom.clear();
        self.front_top.clear();
        self.stats = PitchStats::default();
    }

    /// The mesh graph tents are pitched on.
    pub fn graph(&self) -> &MeshGraph {
        &self.graph
    }

    /// Configuration in use.
    pub fn config(&self) -> &PitchConfig {
        &self.config
    }

    /// Name of the pole-height strategy.
    pub fn strategy_name(&self) -> &str {
        self.pitcher.strategy_name()
    }

    /// Number of tents.
    pub fn n_tents(&self) -> usize {
        self.tents.len()
    }

    /// A tent by id.
    pub fn tent(&self, id: TentId) -> &Tent {
        &self.tents[id.index()]
    }

    /// All tents in pitch order.
    pub fn tents(&self) -> &[Tent] {
        &self.tents
    }

    /// Height `dt` of the last successful pitch, zero before.
    pub fn slab_height(&self) -> f64 {
        self.dt
    }

    /// Steepest front gradient over all tents and their elements.
    pub fn max_slope(&self) -> f64 {
        self.tents.iter().map(Tent::max_slope).fold(0.0, f64::max)
    }

    /// Number of tent levels.
    pub fn n_levels(&self) -> u32 {
        self.n_levels
    }

    /// Tent ids grouped by level, each group in pitch order.
    pub fn level_batches(&self) -> Vec<Vec<TentId>> {
        let mut batches = vec![Vec::new(); self.n_levels as usize];
        for (i, tent) in self.tents.iter().enumerate() {
            batches[tent.level as usize].push(TentId(i as u32));
        }
        batches
    }

    /// The tent dependency DAG.
    pub fn dependency_table(&self) -> &DependencyTable {
        &self.table
    }

    /// Element wave speeds used by the last pitch.
    pub fn element_speeds(&self) -> &[f64] {
        &self.element_speeds
    }

    /// Front the slab starts from.
    pub fn front_bottom(&self) -> &[f64] {
        &self.front_bottom
    }

    /// Front the slab ends at: the bottom of the next slab.
    pub fn front_top(&self) -> &[f64] {
        &self.front_top
    }

    /// Counters from the last successful pitch.
    pub fn stats(&self) -> &PitchStats {
        &self.stats
    }

    /// Reference heights computed by the last pitch.
    pub fn vertices_reference_height(&self) -> &[f64] {
        self.pitcher.vertices_reference_height()
    }
}

fn check_bottom(graph: &MeshGraph, bottom: &[f64]) -> Result<(), PitchError> {
    let n = graph.mesh().n_vertices();
    if bottom.len() != n {
        return Err(PitchError::InvalidFront {
            reason: format!("expected {n} vertex times, got {}", bottom.len()),
        });
    }
    for (v, &t) in bottom.iter().enumerate() {
        let vertex = VertexId(v as u32);
        if !t.is_finite() {
            return Err(PitchError::InvalidFront {
                reason: format!("vertex {vertex} has non-finite time {t}"),
            });
        }
        let master = graph.master(vertex);
        if bottom[master.index()] != t {
            return Err(PitchError::InconsistentPeriodicity { vertex, master });
        }
    }
    Ok(())
}

/// Borrowed state of one pitch; results are moved out on success only.
struct FrontRun<'a> {
    pitcher: &'a TentSlabPitcher,
    graph: &'a MeshGraph,
    geometry: &'a [SimplexGeometry],
    config: &'a PitchConfig,
    dt: f64,
    tents: Vec<Tent>,
    table: DependencyTable,
    stats: PitchStats,
}

impl FrontRun<'_> {
    fn advance_front(&mut self, front: &mut FrontState) -> Result<(), PitchError> {
        let mut adv_factor = self.config.initial_adv_factor;
        let mut retries = 0u32;
        while front.n_incomplete() > 0 {
            if !self.pitcher.get_ready_vertices(adv_factor, front, self.graph) {
                if front.max_incomplete_ktilde(self.graph) <= 0.0
                    || retries >= self.config.max_stall_retries
                {
                    return Err(PitchError::FrontStalled {
                        adv_factor,
                        retries,
                        incomplete: front.n_incomplete(),
                    });
                }
                adv_factor *= 0.5;
                retries += 1;
                self.stats.stall_recoveries += 1;
                self.stats.min_adv_factor = self.stats.min_adv_factor.min(adv_factor);
                debug!(
                    adv_factor,
                    retries,
                    incomplete = front.n_incomplete(),
                    "no vertex ready, reducing advance factor"
                );
                continue;
            }

            while let Some((pos, level)) =
                self.pitcher.pick_next_vertex_for_pitching(front, self.graph)
            {
                let Some(v) = front.ready.shift_remove_index(pos) else {
                    break;
                };
                self.pitch_vertex(v, level, front);
                self.pitcher.update_neighbours(v, adv_factor, front, self.graph);
            }
            self.stats.rounds += 1;
            retries = 0;
            adv_factor = self.config.initial_adv_factor;
        }
        Ok(())
    }

    /// Pitch one tent per image of master `v` and advance the front.
    fn pitch_vertex(&mut self, v: VertexId, level: u32, front: &mut FrontState) {
        let tbot = front.tau(v);
        let target = front.target(v);
        let reach = tbot + front.ktilde(v);
        let ttop = if reach >= target - TOP_SNAP_RTOL * self.dt {
            target
        } else {
            reach
        };

        let mut deps: SmallVec<[TentId; 8]> = SmallVec::new();
        for &w in std::iter::once(&v).chain(self.graph.master_neighbours(v)) {
            deps.extend_from_slice(front.latest_tents(w));
        }

        let images = self.graph.images(v);
        let first = self.tents.len() as u32;
        let group: SmallVec<[TentId; 2]> =
            (0..images.len() as u32).map(|k| TentId(first + k)).collect();
        for &x in images {
            let id = self.table.push(deps.clone());
            let mut tent = self.build_tent(x, v, tbot, ttop, level, front.times());
            tent.periodic_twins = group.iter().copied().filter(|&t| t != id).collect();
            trace!(tent = %id, vertex = %x, tbot, ttop, level, "pitched tent");
            self.tents.push(tent);
        }

        front.advance(v, ttop, self.graph);
        front.record_tents(v, level, group);
    }

    fn build_tent(
        &self,
        x: VertexId,
        master: VertexId,
        tbot: f64,
        ttop: f64,
        level: u32,
        tau: &[f64],
    ) -> Tent {
        let mesh = self.graph.mesh();
        let nbv: SmallVec<[VertexId; 8]> =
            mesh.vertex_neighbours(x).iter().map(|&(w, _)| w).collect();
        let nbtime = nbv.iter().map(|w| tau[w.index()]).collect();
        let els: SmallVec<[ElementId; 8]> = SmallVec::from_slice(mesh.vertex_elements(x));

        let mut internal_facets: SmallVec<[FacetId; 8]> = SmallVec::new();
        let mut elfnums = Vec::with_capacity(els.len());
        let mut gradphi_bot: SmallVec<[Vec3; 8]> = SmallVec::new();
        let mut gradphi_top: SmallVec<[Vec3; 8]> = SmallVec::new();
        for &e in &els {
            let verts = mesh.element_vertices(e);
            let mut local: SmallVec<[usize; 3]> = SmallVec::new();
            // Local facet i is opposite local vertex i.
            for (&f, &opposite) in mesh.element_facets(e).iter().zip(verts) {
                if opposite == x {
                    continue;
                }
                let pos = match internal_facets.iter().position(|&g| g == f) {
                    Some(pos) => pos,
                    None => {
                        internal_facets.push(f);
                        internal_facets.len() - 1
                    }
                };
                local.push(pos);
            }
            elfnums.push(local);

            let surface = |t: f64| -> SmallVec<[f64; 4]> {
                verts
                    .iter()
                    .map(|&y| if self.graph.master(y) == master { t } else { tau[y.index()] })
                    .collect()
            };
            let geom = &self.geometry[e.index()];
            gradphi_bot.push(geom.gradient_of(&surface(tbot)));
            gradphi_top.push(geom.gradient_of(&surface(ttop)));
        }

        Tent {
            vertex: x,
            tbot,
            ttop,
            nbv,
            nbtime,
            els,
            internal_facets,
            elfnums,
            gradphi_bot,
            gradphi_top,
            level,
            dependents: SmallVec::new(),
            periodic_twins: SmallVec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PitchingMethod;
    use tents_core::GeometryError;
    use tents_mesh::{Mesh, PeriodicMap};

    fn line(n: usize, h: f64) -> MeshGraph {
        MeshGraph::non_periodic(Mesh::interval(0.0, n as f64 * h, n).unwrap())
    }

    #[test]
    fn five_vertex_line_gives_two_levels() {
        let mut slab = TentPitchedSlab::new(line(4, 1.0), PitchConfig::default()).unwrap();
        slab.pitch_tents(0.5, &WaveSpeedField::Constant(1.0)).unwrap();
        assert_eq!(slab.vertices_reference_height(), &[0.5; 5]);
        assert_eq!(slab.n_tents(), 5);
        assert_eq!(slab.n_levels(), 2);
        let order: Vec<u32> = slab.tents().iter().map(|t| t.vertex().0).collect();
        assert_eq!(order, vec![0, 2, 4, 1, 3]);
        assert_eq!(slab.dependency_table().n_edges(), 4);
        assert_eq!(slab.dependency_table().depends_on(TentId(3)), &[TentId(0), TentId(1)]);
        assert_eq!(slab.tent(TentId(0)).dependents(), &[TentId(3)]);
        assert_eq!(
            slab.level_batches(),
            vec![vec![TentId(0), TentId(1), TentId(2)], vec![TentId(3), TentId(4)]]
        );
        assert_eq!(slab.stats().rounds, 1);
        assert_eq!(slab.slab_height(), 0.5);
    }

    #[test]
    fn tent_records_patch_data() {
        let mut slab = TentPitchedSlab::new(line(4, 1.0), PitchConfig::default()).unwrap();
        slab.pitch_tents(0.5, &WaveSpeedField::Constant(1.0)).unwrap();
        // Tent 3 is centred at vertex 1 after both neighbours were pitched.
        let t = slab.tent(TentId(3));
        assert_eq!(t.vertex(), VertexId(1));
        assert_eq!(t.neighbours(), &[VertexId(0), VertexId(2)]);
        assert_eq!(t.neighbour_times(), &[0.5, 0.5]);
        assert_eq!(t.elements().len(), 2);
        // In 1D the only internal facet is the vertex itself.
        assert_eq!(t.internal_facets().len(), 1);
        assert_eq!(t.element_internal_facets(0), &[0]);
        assert_eq!(t.gradphi_bot(0)[0], -0.5);
        assert_eq!(t.gradphi_top(0)[0], 0.0);
        assert_eq!(t.height(), 0.5);
        assert!(t.to_string().contains("level 1"));
        assert!((slab.max_slope() - 0.5).abs() < 1e-15);
    }

    #[test]
    fn zero_wave_speed_fails_and_leaves_no_tents() {
        let mut slab = TentPitchedSlab::new(line(3, 1.0), PitchConfig::default()).unwrap();
        slab.pitch_tents(0.5, &WaveSpeedField::Constant(1.0)).unwrap();
        assert!(slab.n_tents() > 0);
        let err = slab
            .pitch_tents(0.5, &WaveSpeedField::PerElement(vec![1.0, 0.0, 1.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            PitchError::InvalidGeometry(GeometryError::NonPositiveWaveSpeed { .. })
        ));
        assert_eq!(slab.n_tents(), 0);
        assert!(slab.front_top().is_empty());
    }

    #[test]
    fn rejects_bad_slab_height() {
        let mut slab = TentPitchedSlab::new(line(2, 1.0), PitchConfig::default()).unwrap();
        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                slab.pitch_tents(dt, &WaveSpeedField::Constant(1.0)),
                Err(PitchError::InvalidSlabHeight { .. })
            ));
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let cfg = PitchConfig {
            global_ct: 0.0,
            ..PitchConfig::default()
        };
        assert!(matches!(
            TentPitchedSlab::new(line(2, 1.0), cfg),
            Err(PitchError::Config(_))
        ));
    }

    #[test]
    fn stall_budget_controls_recovery() {
        // h = 0.25 <= dt, so ktilde equals refdt and factor 1.0 never passes.
        let cfg = PitchConfig {
            initial_adv_factor: 1.0,
            max_stall_retries: 0,
            ..PitchConfig::default()
        };
        let mut slab = TentPitchedSlab::new(line(4, 0.25), cfg).unwrap();
        let err = slab.pitch_tents(0.5, &WaveSpeedField::Constant(1.0)).unwrap_err();
        assert!(matches!(err, PitchError::FrontStalled { retries: 0, .. }));
        assert_eq!(slab.n_tents(), 0);

        let cfg = PitchConfig {
            initial_adv_factor: 1.0,
            max_stall_retries: 1,
            ..PitchConfig::default()
        };
        let mut slab = TentPitchedSlab::new(line(4, 0.25), cfg).unwrap();
        slab.pitch_tents(0.5, &WaveSpeedField::Constant(1.0)).unwrap();
        assert!(slab.stats().stall_recoveries >= 1);
        assert_eq!(slab.stats().min_adv_factor, 0.5);
        assert!(slab.front_top().iter().all(|&t| t == 0.5));
    }

    #[test]
    fn resumed_slab_starts_at_previous_top() {
        let graph = Arc::new(line(4, 1.0));
        let mut first = TentPitchedSlab::new(graph.clone(), PitchConfig::default()).unwrap();
        first.pitch_tents(0.5, &WaveSpeedField::Constant(1.0)).unwrap();
        let mut second = TentPitchedSlab::new(graph, PitchConfig::default()).unwrap();
        second
            .pitch_tents_from(first.front_top(), 0.5, &WaveSpeedField::Constant(1.0))
            .unwrap();
        assert!(second.front_top().iter().all(|&t| t == 1.0));
        assert!(second.tents().iter().all(|t| t.tbot() >= 0.5));
        assert_eq!(second.front_bottom(), first.front_top());
    }

    #[test]
    fn bottom_front_is_validated() {
        let mesh = Mesh::interval(0.0, 3.0, 3).unwrap();
        let graph = MeshGraph::new(mesh, PeriodicMap::interval(3).unwrap()).unwrap();
        let mut slab = TentPitchedSlab::new(graph, PitchConfig::default()).unwrap();
        let c = WaveSpeedField::Constant(1.0);
        assert!(matches!(
            slab.pitch_tents_from(&[0.0; 3], 0.5, &c),
            Err(PitchError::InvalidFront { .. })
        ));
        assert!(matches!(
            slab.pitch_tents_from(&[0.0, 0.0, f64::NAN, 0.0], 0.5, &c),
            Err(PitchError::InvalidFront { .. })
        ));
        assert_eq!(
            slab.pitch_tents_from(&[0.0, 0.0, 0.0, 0.1], 0.5, &c),
            Err(PitchError::InconsistentPeriodicity {
                vertex: VertexId(3),
                master: VertexId(0)
            })
        );
    }

    #[test]
    fn periodic_images_are_pitched_as_twins() {
        let mesh = Mesh::interval(0.0, 4.0, 4).unwrap();
        let graph = MeshGraph::new(mesh, PeriodicMap::interval(4).unwrap()).unwrap();
        let mut slab = TentPitchedSlab::new(graph, PitchConfig::default()).unwrap();
        slab.pitch_tents(0.5, &WaveSpeedField::Constant(1.0)).unwrap();
        // Master 0 yields two tents, one per image.
        assert_eq!(slab.n_tents(), 5);
        let (a, b) = (slab.tent(TentId(0)), slab.tent(TentId(1)));
        assert_eq!((a.vertex(), b.vertex()), (VertexId(0), VertexId(4)));
        assert_eq!(a.periodic_twins(), &[TentId(1)]);
        assert_eq!(b.periodic_twins(), &[TentId(0)]);
        assert_eq!(a.ttop(), b.ttop());
        assert_eq!(a.level(), b.level());
        assert_eq!(slab.front_top()[4], 0.5);
    }

    #[test]
    fn edge_strategy_is_selected_by_config() {
        let cfg = PitchConfig::with_method(PitchingMethod::EdgeGradient);
        let mut slab = TentPitchedSlab::new(line(4, 1.0), cfg).unwrap();
        assert_eq!(slab.strategy_name(), "edge");
        slab.pitch_tents(0.5, &WaveSpeedField::Constant(1.0)).unwrap();
        assert_eq!(slab.n_tents(), 5);
    }

    struct OneDimOnly;

    impl PoleHeightStrategy for OneDimOnly {
        fn name(&self) -> &str {
            "one-dim"
        }

        fn supports_dimension(&self, dim: usize) -> bool {
            dim == 1
        }

        fn initialize_mesh_data(&mut self, _: &MeshData<'_>) -> Result<(), GeometryError> {
            Ok(())
        }

        fn pole_height(&self, _: VertexId, _: &[f64], _: &MeshGraph) -> f64 {
            0.0
        }
    }

    #[test]
    fn strategy_dimension_is_checked_at_construction() {
        let graph = MeshGraph::non_periodic(Mesh::unit_square(1).unwrap());
        let err =
            TentPitchedSlab::with_strategy(graph, Box::new(OneDimOnly), PitchConfig::default())
                .unwrap_err();
        assert_eq!(
            err,
            PitchError::UnsupportedDimension {
                strategy: "one-dim".into(),
                dim: 2
            }
        );
    }

    #[test]
    fn zero_pole_height_everywhere_fails_fast() {
        let cfg = PitchConfig {
            max_stall_retries: 1000,
            ..PitchConfig::default()
        };
        let mut slab =
            TentPitchedSlab::with_strategy(line(2, 1.0), Box::new(OneDimOnly), cfg).unwrap();
        let err = slab.pitch_tents(0.5, &WaveSpeedField::Constant(1.0)).unwrap_err();
        assert!(matches!(err, PitchError::FrontStalled { retries: 0, incomplete: 3, .. }));
    }
}
