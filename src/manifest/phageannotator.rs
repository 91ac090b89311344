//! Parameters accepted by the nf-core/phageannotator pipeline.

use super::ValueKind::{Boolean, Directory, File, Float, Integer, String};
use super::{Manifest, ParamSpec, ParamType, ParamValue, ValueKind};

fn req(kind: ValueKind) -> ParamType {
    ParamType::Required(kind)
}

fn opt(kind: ValueKind) -> ParamType {
    ParamType::Optional(kind)
}

/// Returns the built-in manifest, in the order the pipeline's flags are emitted.
#[must_use]
pub fn phageannotator() -> Manifest {
    Manifest { specs: specs() }
}

#[allow(clippy::too_many_lines)]
fn specs() -> Vec<ParamSpec> {
    vec![
        ParamSpec::new("input", req(File))
            .section("Input/output options")
            .describe("Path to comma-separated file containing information about the samples in the experiment."),
        ParamSpec::new("outdir", req(Directory))
            .describe("The output directory where the results will be saved. You have to use absolute paths to storage on Cloud infrastructure.")
            .output(),
        ParamSpec::new("email", opt(String))
            .describe("Email address for completion summary."),
        ParamSpec::new("multiqc_title", opt(String))
            .describe("MultiQC report title. Printed as page header, used for filename if not otherwise specified."),
        ParamSpec::new("assembly_min_length", opt(Integer))
            .default_value(ParamValue::Int(1000))
            .section("Assembly filtering options")
            .describe("Minimum assembly length"),
        ParamSpec::new("run_viromeqc", opt(Boolean))
            .section("Virus enrichment options")
            .describe("Run ViromeQC to estimate viral enrichment"),
        ParamSpec::new("run_reference_containment", opt(Boolean))
            .section("Reference virus containment options")
            .describe("Run MASH screen to identify external viruses contained in reads"),
        ParamSpec::new("reference_virus_fasta", opt(File))
            .describe("Path to FASTA file containing reference virus sequences"),
        ParamSpec::new("reference_virus_sketch", opt(File))
            .describe("Path to mash sketch file for reference virus sequences"),
        ParamSpec::new("save_reference_virus_sketch", opt(Boolean))
            .describe("Save reference virus sketch, if it was created."),
        ParamSpec::new("mash_screen_min_score", opt(Float))
            .default_value(ParamValue::Float(0.95))
            .describe("Minimum mash screen score to consider a genome contained"),
        ParamSpec::new("mash_screen_winner_take_all", opt(Boolean))
            .describe("Hashes present in multiple references are assigned only to top sequence"),
        ParamSpec::new("skip_genomad", opt(Boolean))
            .section("Virus classification options")
            .describe("Skip running geNomad to classify viral/non-viral sequences"),
        ParamSpec::new("genomad_db", opt(Directory))
            .describe("Path to directory containing geNomad's database"),
        ParamSpec::new("save_genomad_db", opt(Boolean))
            .describe("Save geNomad's database, if it was downloaded."),
        ParamSpec::new("genomad_min_score", opt(Float))
            .default_value(ParamValue::Float(0.7))
            .describe("Minimum virus score for a sequence to be considered viral"),
        ParamSpec::new("genomad_max_fdr", opt(Float))
            .default_value(ParamValue::Float(0.1))
            .describe("Maximum FDR for a sequence to be considered viral (will include --enable-score-calibration)"),
        ParamSpec::new("genomad_splits", opt(Integer))
            .default_value(ParamValue::Int(5))
            .describe("Number of splits for running geNomad (more splits lowers memory requirements)"),
        ParamSpec::new("run_cobra", opt(Boolean))
            .section("Viral contig extension")
            .describe("Run COBRA to extend viral contigs"),
        ParamSpec::new("cobra_assembler", opt(String))
            .describe("The assembler that was used to assemble viral contigs"),
        ParamSpec::new("cobra_mink", opt(String))
            .describe("Minimum kmer value used during assembly"),
        ParamSpec::new("cobra_maxk", opt(String))
            .describe("Maximum kmer value used during assembly"),
        ParamSpec::new("skip_checkv", opt(Boolean))
            .section("Virus quality options")
            .describe("Skip running CheckV to assess virus quality and filter sequences"),
        ParamSpec::new("checkv_db", opt(String))
            .describe("Path to directory containing CheckV database"),
        ParamSpec::new("save_checkv_db", opt(Boolean))
            .describe("Save CheckV's database, if it was downloaded"),
        ParamSpec::new("checkv_min_length", opt(Integer))
            .default_value(ParamValue::Int(3000))
            .describe("Minimum virus length to pass filtering"),
        ParamSpec::new("checkv_min_completeness", opt(Integer))
            .default_value(ParamValue::Int(50))
            .describe("Minimum CheckV completeness to pass filtering"),
        ParamSpec::new("checkv_remove_proviruses", opt(Boolean))
            .describe("Remove viruses labeled as provirus by geNomad or CheckV"),
        ParamSpec::new("checkv_remove_warnings", opt(Boolean))
            .describe("Remove viruses with CheckV warnings"),
        ParamSpec::new("skip_virus_clustering", opt(Boolean))
            .section("Genome clustering options")
            .describe("Skip ANI-based virus clustering"),
        ParamSpec::new("blast_min_percent_identity", opt(Integer))
            .default_value(ParamValue::Int(90))
            .describe("Minimum precent identity for BLAST hits"),
        ParamSpec::new("blast_max_num_seqs", opt(Integer))
            .default_value(ParamValue::Int(25000))
            .describe("Maximum number of BLAST hits to record for each sequence"),
        ParamSpec::new("anicluster_min_ani", opt(Integer))
            .default_value(ParamValue::Int(95))
            .describe("Minimum average nucleotide identity (ANI) for sequences to be clustered together"),
        ParamSpec::new("anicluster_min_qcov", opt(Integer))
            .default_value(ParamValue::Int(0))
            .describe("Minimum query coverage for sequences to be clustered together"),
        ParamSpec::new("anicluster_min_tcov", opt(Integer))
            .default_value(ParamValue::Int(85))
            .describe("Minimum test coverage for sequences to be clustered together"),
        ParamSpec::new("skip_read_alignment", opt(Boolean))
            .section("Virus abundance options")
            .describe("Skip read alignment to viral sequences"),
        ParamSpec::new("coverm_min_read_alignment", opt(Integer))
            .default_value(ParamValue::Int(0))
            .describe("Minimum length of reads aligned to references"),
        ParamSpec::new("coverm_min_percent_identity", opt(Integer))
            .default_value(ParamValue::Int(0))
            .describe("Minimum percent identity of aligned reads"),
        ParamSpec::new("coverm_min_percent_read_aligned", opt(Integer))
            .default_value(ParamValue::Int(0))
            .describe("Minimum percent of read aligned to references"),
        ParamSpec::new("coverm_metrics", opt(String))
            .default_value(ParamValue::str("mean"))
            .describe("Abundance calculation metrics"),
        ParamSpec::new("run_genomad_taxonomy", opt(Boolean))
            .section("Virus taxonomy options"),
        ParamSpec::new("run_iphop", opt(Boolean))
            .section("Phage host options")
            .describe("Run iPHoP to predict phage hosts"),
        ParamSpec::new("iphop_db", opt(String))
            .describe("Path to locally iPHoP database"),
        ParamSpec::new("save_iphop_db", opt(Boolean))
            .describe("Save downloaded iPHoP database"),
        ParamSpec::new("iphop_min_score", opt(Integer))
            .default_value(ParamValue::Int(90))
            .describe("Minimum confidence score to provide host prediction"),
        ParamSpec::new("run_bacphlip", opt(Boolean))
            .section("Virus lifestyle options")
            .describe("Run BACPHLIP to predict virus lifestyle"),
        ParamSpec::new("run_pharokka", opt(Boolean))
            .section("Virus function options")
            .describe("Run pharokka to predict and annotate phage ORFs"),
        ParamSpec::new("pharokka_db", opt(String))
            .describe("Path to predownloaded pharokka db"),
        ParamSpec::new("skip_instrain", opt(Boolean))
            .section("Virus microdiversity options")
            .describe("Bypass microdiversity analysis with inStrain"),
        ParamSpec::new("instrain_min_ani", opt(Float))
            .describe("Minimum identity for read alignment to be considered"),
        ParamSpec::new("instrain_min_mapq", opt(Integer))
            .describe("Minimum MAPQ for a read to be considered"),
        ParamSpec::new("instrain_min_variant_cov", opt(Integer))
            .describe("Minimum coverage for a variant to be considered"),
        ParamSpec::new("instrain_min_snp_freq", opt(Float))
            .describe("Minimum allele frequency for an SNP to be considered"),
        ParamSpec::new("instrain_max_snp_fdr", opt(Integer))
            .describe("Maximum FDR for a SNP to be considered"),
        ParamSpec::new("instrain_min_genome_cov", opt(Float))
            .describe("Minimum number of reads mapping to a genome to consider profiling"),
        ParamSpec::new("instrain_popani_thresh", opt(Float))
            .describe("Minimum identity for genomes to be considered in the same strain"),
        ParamSpec::new("instrain_min_genome_comp", opt(Float))
            .describe("Minimum percent of genomes compared for comparison to be considered"),
        ParamSpec::new("instrain_min_genome_breadth", opt(Float))
            .describe("Minimum breadth of coverage for a genome to be considered present"),
        ParamSpec::new("multiqc_methods_description", opt(String))
            .section("Generic options")
            .describe("Custom MultiQC yaml file containing HTML including a methods description."),
        ParamSpec::new("logo", opt(Boolean))
            .default_value(ParamValue::Bool(true))
            .describe("Use logo in initialise subworkflow"),
    ]
}
