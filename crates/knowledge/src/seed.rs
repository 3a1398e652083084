//! Core knowledge documents
//!
//! The built-in company/product documents loaded into the store at startup.
//! Loading is idempotent: ids derive from content, and the store skips ids
//! it already holds.

use crate::document::KnowledgeDocument;
use crate::store::KnowledgeStore;
use crate::KnowledgeError;

/// The built-in document set.
pub fn core_documents() -> Vec<KnowledgeDocument> {
    vec![
        // Company
        KnowledgeDocument::new(
            "CloudWalk Mission",
            "Our mission is to create the best payment network on Earth. Then other planets. \
             We are democratizing the financial industry, empowering entrepreneurs through \
             technological, inclusive and life-changing solutions.",
            "company",
            "en",
        )
        .with_subcategory("mission")
        .with_tags(&["mission", "vision", "company", "about"]),
        // InfinitePay - Brazilian product
        KnowledgeDocument::new(
            "InfinitePay Overview",
            "InfinitePay is a powerful financial platform democratizing access to world-class \
             payment products and software, currently serving millions of clients in Brazil. \
             Launched in 2019, it represented the most disruptive wave of innovation in the \
             Brazilian payments industry.",
            "products",
            "en",
        )
        .with_subcategory("infinitepay")
        .with_tags(&["infinitepay", "brazil", "payments", "maquininha"])
        .with_product("infinitepay"),
        KnowledgeDocument::new(
            "InfinitePay Fees",
            "InfinitePay offers the lowest fees in Brazil: 0.00% for Pix, 0.75% for Debit, \
             2.69% for Credit (1x), and 8.99% for Credit (12x). These are final rates including \
             anticipation. No monthly fees or hidden costs.",
            "products",
            "en",
        )
        .with_subcategory("fees")
        .with_tags(&["fees", "rates", "pricing", "costs", "infinitepay"])
        .with_product("infinitepay"),
        KnowledgeDocument::new(
            "InfinitePay Maquininha Smart",
            "The Maquininha Smart is available for just 12x R$ 16.58 or R$ 199. It includes: \
             Pix with zero fees, receipt printing, long battery life, inventory management, \
             free shipping, and no rental fees or loyalty requirements.",
            "products",
            "en",
        )
        .with_subcategory("hardware")
        .with_tags(&["maquininha", "hardware", "terminal", "pos", "infinitepay"])
        .with_product("infinitepay"),
        KnowledgeDocument::new(
            "InfiniteTap - Phone as Card Reader",
            "InfiniteTap transforms your smartphone into a card reader in less than 5 minutes. \
             Works on Android and iOS with NFC. Zero investment required, accepts payments up \
             to 12x installments.",
            "products",
            "en",
        )
        .with_subcategory("infinitetap")
        .with_tags(&["tap", "nfc", "mobile", "smartphone", "infinitepay"])
        .with_product("infinitepay"),
        // JIM - US product
        KnowledgeDocument::new(
            "JIM Overview",
            "JIM brings the power of instant payments for everyone in the US. Combining cutting \
             edge technology with unparalleled design, JIM enables sellers to accept payments, \
             receive money instantly, and access a next generation AI assistant.",
            "products",
            "en",
        )
        .with_subcategory("jim")
        .with_tags(&["jim", "usa", "instant", "payments"])
        .with_product("jim"),
        KnowledgeDocument::new(
            "JIM Features and Pricing",
            "JIM offers: 1.99% per transaction (lowest in market), instant payouts in seconds, \
             no hardware needed (phone only), accepts all major cards and digital wallets, \
             AI-powered business insights. No hidden fees, no monthly charges.",
            "products",
            "en",
        )
        .with_subcategory("features")
        .with_tags(&["jim", "fees", "instant", "mobile", "ai"])
        .with_product("jim"),
        // STRATUS - blockchain
        KnowledgeDocument::new(
            "STRATUS Blockchain",
            "STRATUS is a high performance, secure, scalable, and open-source blockchain \
             designed for global payment networks. It processes up to 1,800 transactions per \
             second (TPS) with potential for infinite growth through sharding and multi-raft \
             consensus models.",
            "products",
            "en",
        )
        .with_subcategory("stratus")
        .with_tags(&["stratus", "blockchain", "technology", "infrastructure"])
        .with_product("stratus"),
        // AI and technology
        KnowledgeDocument::new(
            "CloudWalk AI Capabilities",
            "CloudWalk leverages AI across multiple fronts: fraud detection with 3-layer system \
             (transactional, behavioral, relational), credit assessment using actual behavior \
             data, customer support automation handling substantial chats without human \
             intervention, and merchant vector space for business analysis.",
            "technology",
            "en",
        )
        .with_subcategory("ai")
        .with_tags(&["ai", "ml", "fraud", "credit", "automation"]),
        // Support
        KnowledgeDocument::new(
            "CloudWalk Support Excellence",
            "CloudWalk provides RA1000-rated support, the highest quality rating in Brazil. Our \
             support team is always ready to help with questions and resolve problems quickly \
             and efficiently.",
            "support",
            "en",
        )
        .with_subcategory("customer_service")
        .with_tags(&["support", "ra1000", "help", "service"]),
        // Portuguese content
        KnowledgeDocument::new(
            "Visão Geral InfinitePay",
            "InfinitePay é uma poderosa plataforma financeira democratizando o acesso a \
             produtos de pagamento de classe mundial, atualmente atendendo milhões de clientes \
             no Brasil. Lançada em 2019, representou a onda mais disruptiva de inovação no \
             setor de pagamentos brasileiro.",
            "products",
            "pt-BR",
        )
        .with_subcategory("infinitepay")
        .with_tags(&["infinitepay", "brasil", "pagamentos", "maquininha"])
        .with_product("infinitepay"),
        KnowledgeDocument::new(
            "Taxas InfinitePay",
            "InfinitePay oferece as menores taxas do Brasil: 0,00% no Pix, 0,75% no Débito, \
             2,69% no Crédito à vista, e 8,99% no Crédito 12x. São taxas finais já com \
             antecipação. Sem mensalidade ou custos escondidos.",
            "products",
            "pt-BR",
        )
        .with_subcategory("fees")
        .with_tags(&["taxas", "preços", "custos", "infinitepay"])
        .with_product("infinitepay"),
    ]
}

/// Load the core documents into the store (no-op for already-present ids).
pub async fn load_core_knowledge(store: &KnowledgeStore) -> Result<usize, KnowledgeError> {
    let added = store.upsert(core_documents()).await?;
    if added > 0 {
        tracing::info!(added, "Loaded core knowledge documents");
    }
    Ok(added)
}
